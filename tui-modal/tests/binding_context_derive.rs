//! Tests for #[derive(BindingContext)]

use tui_modal::testing::key;
use tui_modal::{BindingContext, Keymap};

#[derive(BindingContext, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum KeyContext {
    Page,
    Dialog,
    ConfirmPrompt,
}

#[test]
fn test_context_names() {
    assert_eq!(KeyContext::Page.name(), "page");
    assert_eq!(KeyContext::ConfirmPrompt.name(), "confirm_prompt");
    assert_eq!(KeyContext::from_name("dialog"), Some(KeyContext::Dialog));
    assert_eq!(KeyContext::from_name("Dialog"), None);
    assert_eq!(
        KeyContext::all(),
        &[KeyContext::Page, KeyContext::Dialog, KeyContext::ConfirmPrompt]
    );
}

#[test]
fn test_derived_context_drives_keymap() {
    let mut keymap = Keymap::<KeyContext>::new();
    keymap.bind_global("quit", &["q"]);
    keymap.bind(KeyContext::Dialog, "close", &["enter"]);

    assert_eq!(
        keymap.command_for(&key("enter"), KeyContext::Dialog),
        Some("close")
    );
    assert_eq!(keymap.command_for(&key("enter"), KeyContext::Page), None);
    assert_eq!(keymap.command_for(&key("q"), KeyContext::Page), Some("quit"));
}

#[test]
fn test_keymap_json_uses_context_names() {
    let json = r#"{ "global": { "quit": ["ctrl+q"] }, "confirm_prompt": { "close": ["n"] } }"#;
    let keymap: Keymap<KeyContext> = serde_json::from_str(json).unwrap();
    assert_eq!(
        keymap.command_for(&key("n"), KeyContext::ConfirmPrompt),
        Some("close")
    );
}
