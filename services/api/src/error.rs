//! Custom error types for the API service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for the API service
///
/// Expected business outcomes (`Validation`, `InvalidStatus`,
/// `DateUnavailable`) carry messages the calling UI can show as-is;
/// `Internal` is logged here and answered with a generic message.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request payload failed validation
    #[error("{0}")]
    Validation(String),

    /// Status value outside the booking vocabulary
    #[error("Invalid booking status: {0}")]
    InvalidStatus(String),

    /// Missing, invalid or expired session token
    #[error("Unauthorized")]
    Unauthorized,

    /// Referenced record does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Requested day is blocked or already booked
    #[error("Date is unavailable, please pick another date")]
    DateUnavailable,

    /// Internal server error
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InvalidStatus(value) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid booking status: {}", value),
            ),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            ApiError::DateUnavailable => (
                StatusCode::CONFLICT,
                "Date is unavailable, please pick another date".to_string(),
            ),
            ApiError::Internal(err) => {
                error!("Internal error: {err:#}");
                let message = if cfg!(debug_assertions) {
                    format!("Internal server error: {err:#}")
                } else {
                    "Internal server error".to_string()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
