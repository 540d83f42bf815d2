//! Terminal page hosting a dismissible dialog
//!
//! Library half of the `modal-host` binary, exposed for integration tests.

pub mod action;
pub mod components;
pub mod config;
pub mod host;
pub mod logging;
pub mod reducer;
pub mod state;
