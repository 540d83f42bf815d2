//! Application state - single source of truth
//!
//! Only the reducer mutates it. The page's scroll position is not here: it
//! belongs to the document, which the dialog locks while it is open.

/// Everything the host view needs to render
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    /// Whether the dialog is showing
    pub modal_open: bool,

    /// Terminal size, for layout decisions
    pub terminal_size: (u16, u16),
}

impl AppState {
    pub fn new(terminal_size: (u16, u16)) -> Self {
        Self {
            modal_open: false,
            terminal_size,
        }
    }
}
