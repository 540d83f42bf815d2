//! Actions
//!
//! Categories are inferred from the name prefix: `ModalOpen` and `ModalClose`
//! land in `modal`. `UiTerminalResize` is placed in `ui` explicitly since
//! "Resize" does not end a category prefix.

/// Application actions
#[derive(tui_modal::Action, Clone, Debug, PartialEq, Eq)]
#[action(infer_categories)]
pub enum Action {
    // ===== Modal category =====
    /// Show the dialog (trigger button)
    ModalOpen,

    /// Hide the dialog (backdrop click, Escape, Close button)
    ModalClose,

    // ===== UI category =====
    #[action(category = "ui")]
    UiTerminalResize(u16, u16),

    // ===== Uncategorized =====
    /// Exit the application
    Quit,
}
