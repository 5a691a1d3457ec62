//! # memberdesk
//!
//! Customer records over a REST API: the server lives in `web-server`, and this
//! crate holds the terminal UI that drives it through `api-client`.

pub mod commands;
pub mod error;
pub mod ui;

pub use error::UiError;
