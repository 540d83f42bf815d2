//! Tests for #[derive(Action)]

use tui_modal::{Action, ActionCategory};

#[derive(Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
enum AppAction {
    ModalOpen,
    ModalClose,
    PageScrollDown,
    #[action(category = "ui")]
    UiTerminalResize(u16, u16),
    #[action(skip_category)]
    ModalSubmit { confirmed: bool },
    Quit,
}

#[derive(Action, Clone, Debug)]
enum PlainAction {
    Open,
    Close,
}

#[test]
fn test_name_covers_every_variant_shape() {
    assert_eq!(AppAction::ModalOpen.name(), "ModalOpen");
    assert_eq!(AppAction::UiTerminalResize(80, 24).name(), "UiTerminalResize");
    assert_eq!(
        AppAction::ModalSubmit { confirmed: true }.name(),
        "ModalSubmit"
    );
    assert_eq!(PlainAction::Close.name(), "Close");
}

#[test]
fn test_inferred_categories() {
    assert_eq!(AppAction::ModalOpen.category(), Some("modal"));
    assert_eq!(AppAction::ModalClose.category(), Some("modal"));
    assert_eq!(AppAction::PageScrollDown.category(), Some("page"));
    assert_eq!(AppAction::Quit.category(), None);
}

#[test]
fn test_explicit_and_skipped_categories() {
    assert_eq!(AppAction::UiTerminalResize(1, 1).category(), Some("ui"));
    assert_eq!(AppAction::ModalSubmit { confirmed: false }.category(), None);
}

#[test]
fn test_category_predicates() {
    assert!(AppAction::ModalOpen.is_modal());
    assert!(AppAction::ModalClose.is_modal());
    assert!(!AppAction::ModalSubmit { confirmed: true }.is_modal());
    assert!(AppAction::PageScrollDown.is_page());
    assert!(AppAction::UiTerminalResize(1, 1).is_ui());
}
