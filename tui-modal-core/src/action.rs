//! Action trait for type-safe state mutations

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions describe intents such as "open the dialog" or "close the dialog".
/// They must be:
/// - Clone: middleware sees the action after the reducer has consumed it
/// - Debug: for logging
/// - Send + 'static: actions travel through tokio channels
///
/// Use `#[derive(Action)]` from `tui-modal-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Category lookup for actions
///
/// Generated by `#[derive(Action)]` with `#[action(infer_categories)]`.
/// `ModalOpen` and `ModalClose` both land in the `"modal"` category.
pub trait ActionCategory: Action {
    /// Category name, or `None` for uncategorized actions
    fn category(&self) -> Option<&'static str>;
}
