//! tui-modal: modal dialogs for Rust TUI apps
//!
//! The application owns whether the dialog is open; the dialog owns what it
//! takes from the page while visible. State changes go through dispatched
//! actions like in Redux/Elm.
//!
//! # Example
//! ```ignore
//! use tui_modal::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(infer_categories)]
//! enum AppAction {
//!     ModalOpen,
//!     ModalClose,
//!     Quit,
//! }
//!
//! #[derive(BindingContext, Clone, Copy, PartialEq, Eq, Hash, Debug)]
//! enum KeyContext {
//!     Page,
//!     Dialog,
//! }
//! ```

// Re-export everything from core
pub use tui_modal_core::*;

// Action assertions for tests
pub use tui_modal_core::{assert_emitted, assert_not_emitted, count_emitted};

// Re-export derive macros
pub use tui_modal_macros::{Action, BindingContext};

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use tui_modal_core::{Action, ActionCategory, BindingContext, Component};

    // Page environment
    pub use tui_modal_core::{
        Document, KeyListeners, ListenerHandle, Overflow, ScrollLock, ScrollRoot,
    };

    // Event system
    pub use tui_modal_core::{spawn_event_poller, translate, EventKind, EventType, PollerConfig};

    // Keymap
    pub use tui_modal_core::{format_key_for_display, parse_key_string, Keymap};

    // Store and runtime
    pub use tui_modal_core::{
        DispatchRuntime, EventOutcome, LoggingMiddleware, Middleware, NoopMiddleware, Reducer,
        Store,
    };

    // Derive macros
    pub use tui_modal_macros::{Action, BindingContext};

    // Ratatui re-exports
    pub use tui_modal_core::{Color, Frame, Line, Modifier, Rect, Span, Style, Text};
}
