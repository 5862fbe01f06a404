//! Admin account model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Admin entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// New admin creation payload. The password arrives in the clear and is
/// hashed by the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAdmin {
    pub email: String,
    pub password: String,
}
