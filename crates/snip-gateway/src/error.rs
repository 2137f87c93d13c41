use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use snip_core::ShortenerError;
use snip_redirector::RedirectorError;
use thiserror::Error;
use tracing::{debug, error};

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced to HTTP clients.
///
/// Response bodies only ever carry a generic message; the detail stays in
/// the logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("short code not found")]
    NotFound,
    #[error("short code space exhausted after {0} attempts")]
    Exhausted(u32),
    #[error("storage failure: {0}")]
    Storage(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ShortenerError> for AppError {
    fn from(error: ShortenerError) -> Self {
        match error {
            ShortenerError::InvalidUrl(reason) => AppError::InvalidUrl(reason),
            ShortenerError::Exhausted { attempts } => AppError::Exhausted(attempts),
            ShortenerError::Storage(source) => AppError::Storage(source.to_string()),
            ShortenerError::InvalidSettings(reason) => AppError::Internal(reason),
        }
    }
}

impl From<RedirectorError> for AppError {
    fn from(error: RedirectorError) -> Self {
        match error {
            RedirectorError::Storage(source) => AppError::Storage(source.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidUrl(reason) => {
                debug!(reason = %reason, "rejected shorten request");
                (StatusCode::BAD_REQUEST, "Provide a valid http(s) url")
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Code not found"),
            AppError::Exhausted(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate unique code",
            ),
            AppError::Storage(_) | AppError::Internal(_) => {
                error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
