//! Session repository: issues, validates, and revokes opaque bearer tokens
//!
//! Tokens are random strings stored verbatim; every privileged call is a
//! lookup against the sessions table. Expiry is checked inline on each
//! validation, so correctness never depends on the background sweep.

use anyhow::Result;
use chrono::{Duration, Utc};
use rand::{Rng, distributions::Alphanumeric};
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::{AdminIdentity, Session};

/// Length of the opaque session token
const TOKEN_LEN: usize = 48;

/// Session settings
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Session lifetime in days
    pub ttl_days: i64,
}

impl SessionSettings {
    /// Create session settings from environment variables
    ///
    /// # Environment Variables
    /// - `SESSION_TTL_DAYS`: session lifetime in days (default: 7)
    pub fn from_env() -> Self {
        let ttl_days = std::env::var("SESSION_TTL_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(7);

        SessionSettings { ttl_days }
    }

    /// Session lifetime as a duration
    pub fn ttl(&self) -> Duration {
        Duration::days(self.ttl_days)
    }
}

/// Session repository
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
    settings: SessionSettings,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool, settings: SessionSettings) -> Self {
        Self { pool, settings }
    }

    /// Issue a new session for an admin
    pub async fn create(&self, admin_id: Uuid) -> Result<Session> {
        let token = generate_token();
        let expires_at = Utc::now() + self.settings.ttl();

        let row = sqlx::query(
            r#"
            INSERT INTO sessions (admin_id, token, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, admin_id, token, created_at, expires_at
            "#,
        )
        .bind(admin_id)
        .bind(&token)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        info!("Session created for admin {}", admin_id);

        Ok(Session {
            id: row.get("id"),
            admin_id: row.get("admin_id"),
            token: row.get("token"),
            created_at: row.get("created_at"),
            expires_at: row.get("expires_at"),
        })
    }

    /// Resolve a token to the admin it belongs to
    ///
    /// Returns `None` when the token is unknown or past its expiry. A valid
    /// session is not renewed by use.
    pub async fn validate(&self, token: &str) -> Result<Option<AdminIdentity>> {
        let row = sqlx::query(
            r#"
            SELECT s.admin_id, a.email
            FROM sessions s
            JOIN admins a ON a.id = s.admin_id
            WHERE s.token = $1 AND s.expires_at > $2
            "#,
        )
        .bind(token)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| AdminIdentity {
            admin_id: row.get("admin_id"),
            email: row.get("email"),
        }))
    }

    /// Delete a session by token; no error when the token is unknown
    pub async fn revoke(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete every session belonging to an admin (used on password change)
    pub async fn revoke_all_for_admin(&self, admin_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE admin_id = $1")
            .bind(admin_id)
            .execute(&self.pool)
            .await?;

        info!(
            "Revoked {} session(s) for admin {}",
            result.rows_affected(),
            admin_id
        );
        Ok(result.rows_affected())
    }

    /// Delete expired sessions. Validation already ignores them; this only
    /// keeps the table small.
    pub async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Generate an opaque session token from the thread-local CSPRNG
fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}
