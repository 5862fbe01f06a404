//! Repositories for database operations

use anyhow::Result;
use chrono::Utc;
use sqlx::{PgPool, Row};

use crate::models::AdminIdentity;

pub mod availability;
pub mod booking;
pub mod content;

/// Session repository: resolves bearer tokens issued by the auth service
///
/// This service never creates sessions; it only reads the shared table to
/// authorize admin calls.
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve a token to the admin it belongs to
    ///
    /// Returns `None` when the token is unknown or past its expiry; the
    /// caller turns that into an authorization failure.
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
}
