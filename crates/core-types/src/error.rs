use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid customer identifier: {0}")]
    InvalidId(String),
}

/// Raised before any store interaction when a payload is missing a required field
/// or carries a value that does not parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`{0}` is required")]
    Missing(&'static str),

    #[error("`{0}` must not be empty")]
    Empty(&'static str),

    #[error("`{0}` is not valid")]
    Invalid(&'static str),
}

impl ValidationError {
    /// The JSON field name the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing(field)
            | ValidationError::Empty(field)
            | ValidationError::Invalid(field) => field,
        }
    }
}
