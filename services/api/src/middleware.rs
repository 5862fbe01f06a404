//! Session-token authentication for admin endpoints

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{error::ApiError, models::AdminIdentity, state::AppState};

/// Extractor for admin-only handlers
///
/// Pulls the bearer token from the `Authorization` header and resolves it
/// against the shared sessions table. Handlers using it never run without a
/// live session; a missing, unknown or expired token answers 401 before the
/// handler body starts.
pub struct AdminSession(pub AdminIdentity);

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::Unauthorized)?;

        let identity = state
            .session_repository
            .validate(bearer.token())
            .await?
            .ok_or(ApiError::Unauthorized)?;

        Ok(AdminSession(identity))
    }
}
