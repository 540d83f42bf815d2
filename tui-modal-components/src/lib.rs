//! UI components for tui-modal
//!
//! Components implement the `Component<A>` trait and report intent through
//! action constructors passed in their props.
//!
//! # Components
//!
//! - [`Modal`] - Dismissible dialog over a dimmed, scroll-locked page
//!
//! # Example
//!
//! ```ignore
//! use tui_modal_components::{Modal, ModalProps};
//!
//! let mut modal = Modal::new(document.clone());
//!
//! // In your render function, after drawing the page:
//! modal.render(frame, area, ModalProps {
//!     is_open: state.modal_open,
//!     title: Some("Confirm"),
//!     content: &body,
//!     on_close: || Action::ModalClose,
//! });
//! ```

mod backdrop;
mod modal;

pub use backdrop::{dim_area, dim_color, drop_shadow, fill};
pub use modal::{
    centered_rect, DialogSemantics, Modal, ModalContent, ModalLayout, ModalProps, ModalStyle,
    ModalTarget, Role, Transition, TITLE_ID,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        centered_rect, DialogSemantics, Modal, ModalContent, ModalProps, ModalStyle, ModalTarget,
        Transition,
    };
}
