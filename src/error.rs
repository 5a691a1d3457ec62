use api_client::error::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UiError {
    #[error("Page size must be one of {options:?}, got {got}")]
    InvalidPageSize { got: usize, options: &'static [usize] },

    #[error("Required fields are empty: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{field} is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to style the progress spinner: {0}")]
    Spinner(#[from] indicatif::style::TemplateError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
