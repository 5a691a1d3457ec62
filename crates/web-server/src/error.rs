use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_types::{CoreError, ValidationError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Bad identifier: {0}")]
    BadId(#[from] CoreError),
    #[error("Customer not found")]
    NotFound,
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Not-found and store failures answer with plain text; store details stay in the
/// logs. Validation failures carry a JSON body naming the offending field.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            AppError::Validation(err) => {
                let body = Json(json!({ "error": err.to_string(), "field": err.field() }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::BadId(err) => {
                let body = Json(json!({ "error": err.to_string(), "field": "id" }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Customer not found").into_response(),
        }
    }
}
