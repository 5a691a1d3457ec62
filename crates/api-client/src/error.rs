use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("The HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Customer not found")]
    NotFound,

    #[error("The API rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
