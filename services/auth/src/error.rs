//! Custom error types for the auth service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for the auth service
#[derive(Error, Debug)]
pub enum AuthError {
    /// Request payload failed validation
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid or expired credentials
    #[error("Unauthorized")]
    Unauthorized,

    /// Registration is closed once the first admin account exists
    #[error("Registration is closed")]
    RegistrationClosed,

    /// Too many failed login attempts
    #[error("Too many failed attempts, try again later")]
    TooManyAttempts,

    /// Internal server error
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AuthError::RegistrationClosed => {
                (StatusCode::FORBIDDEN, "Registration is closed".to_string())
            }
            AuthError::TooManyAttempts => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many failed attempts, try again later".to_string(),
            ),
            AuthError::Internal(err) => {
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

/// Type alias for auth results
pub type AuthResult<T> = Result<T, AuthError>;
