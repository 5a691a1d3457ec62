//! Terminal rendition of the customer screens.
//!
//! Everything here is pure: views are built from records and rendered to strings,
//! and the form is a small state machine. Network calls live in [`crate::commands`].

pub mod detail;
pub mod form;
pub mod list;

pub use detail::DetailState;
pub use form::{CustomerForm, FormField, FormMode, FormValues, Submission};
pub use list::{CustomerListView, CustomerRow, Pagination};
