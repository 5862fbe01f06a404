//! Authentication service routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    AppState,
    error::{AuthError, AuthResult},
    models::{Admin, NewAdmin, Session},
    validation,
};

/// Request for first-admin registration
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Request for admin login
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request for password change
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Admin identity on the wire
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: Uuid,
    pub email: String,
}

/// Response for a freshly created session
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    /// Expiry instant in epoch milliseconds
    pub expires_at: i64,
    pub admin: AdminResponse,
}

/// Response for the current session lookup
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub admin: AdminResponse,
}

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/password", post(change_password))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

/// One-time first-admin registration
///
/// Refused with 403 once any admin account exists. The guard lives in the
/// INSERT itself, so two concurrent registrations cannot both succeed.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse> {
    let email = payload.email.trim().to_lowercase();
    validation::validate_email(&email).map_err(AuthError::Validation)?;
    validation::validate_password(&payload.password).map_err(AuthError::Validation)?;

    let admin = state
        .admin_repository
        .create_if_first(&NewAdmin {
            email,
            password: payload.password,
        })
        .await?
        .ok_or(AuthError::RegistrationClosed)?;

    let session = state.session_repository.create(admin.id).await?;
    info!("Registered first admin account: {}", admin.email);

    Ok((StatusCode::CREATED, Json(session_response(&session, &admin))))
}

/// Admin login endpoint
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse> {
    let email = payload.email.trim().to_lowercase();

    if !state.rate_limiter.check(&email).await {
        warn!("Login throttled for {}", email);
        return Err(AuthError::TooManyAttempts);
    }

    let admin = match state.admin_repository.find_by_email(&email).await? {
        Some(admin) => admin,
        None => {
            state.rate_limiter.record_failure(&email).await;
            return Err(AuthError::Unauthorized);
        }
    };

    if !state
        .admin_repository
        .verify_password(&admin, &payload.password)
        .await?
    {
        state.rate_limiter.record_failure(&email).await;
        return Err(AuthError::Unauthorized);
    }

    state.rate_limiter.reset(&email).await;

    // Opportunistic cleanup; expiry is enforced on every lookup regardless.
    let purged = state.session_repository.purge_expired().await?;
    if purged > 0 {
        info!("Purged {} expired sessions", purged);
    }

    let session = state.session_repository.create(admin.id).await?;
    info!("Admin {} logged in", admin.email);

    Ok((StatusCode::OK, Json(session_response(&session, &admin))))
}

/// Current session lookup
pub async fn me(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> AuthResult<impl IntoResponse> {
    let token = bearer_token(bearer)?;
    let identity = state
        .session_repository
        .validate(&token)
        .await?
        .ok_or(AuthError::Unauthorized)?;

    Ok(Json(MeResponse {
        admin: AdminResponse {
            id: identity.admin_id,
            email: identity.email,
        },
    }))
}

/// Logout endpoint
///
/// Revoking an already-revoked or unknown token still answers 200.
pub async fn logout(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> AuthResult<impl IntoResponse> {
    let token = bearer_token(bearer)?;
    state.session_repository.revoke(&token).await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({"message": "Logged out successfully"})),
    ))
}

/// Password change endpoint
///
/// Verifies the current password, then revokes every session for the admin,
/// including the one that made this request.
pub async fn change_password(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(payload): Json<ChangePasswordRequest>,
) -> AuthResult<impl IntoResponse> {
    let token = bearer_token(bearer)?;
    let identity = state
        .session_repository
        .validate(&token)
        .await?
        .ok_or(AuthError::Unauthorized)?;

    let admin = state
        .admin_repository
        .find_by_id(identity.admin_id)
        .await?
        .ok_or(AuthError::Unauthorized)?;

    if !state
        .admin_repository
        .verify_password(&admin, &payload.current_password)
        .await?
    {
        return Err(AuthError::Unauthorized);
    }

    validation::validate_password(&payload.new_password).map_err(AuthError::Validation)?;

    state
        .admin_repository
        .update_password(admin.id, &payload.new_password)
        .await?;
    let revoked = state
        .session_repository
        .revoke_all_for_admin(admin.id)
        .await?;
    info!(
        "Password changed for {}, revoked {} sessions",
        admin.email, revoked
    );

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Password changed, all sessions revoked",
            "revokedSessions": revoked,
        })),
    ))
}

fn bearer_token(header: Option<TypedHeader<Authorization<Bearer>>>) -> AuthResult<String> {
    let TypedHeader(Authorization(bearer)) = header.ok_or(AuthError::Unauthorized)?;
    Ok(bearer.token().to_string())
}

fn session_response(session: &Session, admin: &Admin) -> SessionResponse {
    SessionResponse {
        token: session.token.clone(),
        expires_at: session.expires_at.timestamp_millis(),
        admin: AdminResponse {
            id: admin.id,
            email: admin.email.clone(),
        },
    }
}
