use std::sync::OnceLock;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ErrorResponse;

/// Set once at startup; when true, 5xx bodies carry the underlying error text.
static EXPOSE_ERROR_DETAILS: OnceLock<bool> = OnceLock::new();

/// Enable or disable internal error details in responses (development mode).
pub fn expose_error_details(enabled: bool) {
    if EXPOSE_ERROR_DETAILS.set(enabled).is_err() {
        tracing::warn!("Error detail exposure already configured, ignoring");
    }
}

fn error_details_exposed() -> bool {
    EXPOSE_ERROR_DETAILS.get().copied().unwrap_or(false)
}

/// Body for a 500: always "Server error", with `detail` only when `expose` is set.
fn server_error_body(detail: String, expose: bool) -> ErrorResponse {
    ErrorResponse::new("Server error").with_message(expose.then_some(detail))
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed: {}", .0.join("; "))]
    InvalidFields(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: invalid value ({})", field, err.code),
                })
            })
            .collect();
        messages.sort();
        AppError::InvalidFields(messages)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    server_error_body(e.to_string(), error_details_exposed()),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg)),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            AppError::InvalidFields(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Validation failed").with_errors(errors),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::new(msg)),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, ErrorResponse::new(msg))
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
