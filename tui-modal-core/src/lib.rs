//! Core traits and types for tui-modal
//!
//! Building blocks for terminal applications that host overlay dialogs on
//! top of a scrollable page, following a Redux/Elm-inspired architecture.
//!
//! # Core Concepts
//!
//! - **Action**: Events that describe state changes
//! - **Store**: Centralized state container with reducer pattern
//! - **Component**: UI elements that render from props
//! - **Document**: The page environment an overlay borrows from while visible
//!   (the scroll root and the global key listeners)
//! - **Keymap**: Context-aware key mapping, loadable from JSON
//!
//! # Basic Example
//!
//! ```ignore
//! use tui_modal_core::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum AppAction {
//!     ModalOpen,
//!     ModalClose,
//! }
//!
//! #[derive(Default)]
//! struct AppState {
//!     modal_open: bool,
//! }
//!
//! fn reducer(state: &mut AppState, action: AppAction) -> bool {
//!     let open = matches!(action, AppAction::ModalOpen);
//!     let changed = state.modal_open != open;
//!     state.modal_open = open;
//!     changed
//! }
//!
//! let mut store = Store::new(AppState::default(), reducer);
//! store.dispatch(AppAction::ModalOpen);
//! ```
//!
//! # Page resources
//!
//! Anything an overlay takes from the page is held through a guard. A
//! [`ScrollLock`] hides the page overflow until it is dropped; a
//! [`ListenerHandle`] keeps a key listener attached until it is dropped.
//! Dropping the owner of the guards is enough to give everything back.

pub mod action;
pub mod component;
pub mod document;
pub mod event;
pub mod input;
pub mod keymap;
pub mod listeners;
pub mod runtime;
pub mod scroll;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::{Action, ActionCategory};
pub use component::Component;

// Page environment exports
pub use document::Document;
pub use listeners::{KeyHandler, KeyListeners, ListenerHandle, ListenerId};
pub use scroll::{Overflow, ScrollLock, ScrollRoot};

// Event system exports
pub use event::{EventKind, EventType};
pub use input::{spawn_event_poller, translate, PollerConfig};

// Keymap exports
pub use keymap::{format_key_for_display, parse_key_string, BindingContext, Keymap};

// Store exports
pub use store::{LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store};

// Runtime exports
pub use runtime::{DispatchRuntime, EventOutcome};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

// Testing exports
pub use testing::{
    buffer_rect_to_string_plain, buffer_to_string_plain, char_key, click, ctrl_key, key,
    key_event, mouse_down, scroll, RenderHarness, TestHarness,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionCategory};
    pub use crate::component::Component;
    pub use crate::document::Document;
    pub use crate::event::{EventKind, EventType};
    pub use crate::input::{spawn_event_poller, translate, PollerConfig};
    pub use crate::keymap::{format_key_for_display, parse_key_string, BindingContext, Keymap};
    pub use crate::listeners::{KeyListeners, ListenerHandle};
    pub use crate::runtime::{DispatchRuntime, EventOutcome};
    pub use crate::scroll::{Overflow, ScrollLock, ScrollRoot};
    pub use crate::store::{LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store};

    // Re-export ratatui types
    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
