//! Admin repository for database operations

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::{Admin, NewAdmin};

/// Admin repository
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    /// Create a new admin repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new admin account
    pub async fn create(&self, new_admin: &NewAdmin) -> Result<Admin> {
        info!("Creating admin account: {}", new_admin.email);

        let password_hash = hash_password(&new_admin.password)?;

        let row = sqlx::query(
            r#"
            INSERT INTO admins (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(&new_admin.email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(admin_from_row(&row))
    }

    /// Create the first admin account, refusing once any admin exists.
    ///
    /// The NOT EXISTS guard lives in the statement itself so two concurrent
    /// registrations cannot both pass a separate pre-count. Returns `None`
    /// when registration is already closed.
    pub async fn create_if_first(&self, new_admin: &NewAdmin) -> Result<Option<Admin>> {
        let password_hash = hash_password(&new_admin.password)?;

        let row = sqlx::query(
            r#"
            INSERT INTO admins (email, password_hash)
            SELECT $1, $2
            WHERE NOT EXISTS (SELECT 1 FROM admins)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(&new_admin.email)
        .bind(&password_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| admin_from_row(&row)))
    }

    /// Number of admin accounts
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Find an admin by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM admins
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| admin_from_row(&row)))
    }

    /// Find an admin by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM admins
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| admin_from_row(&row)))
    }

    /// Verify an admin's password
    pub async fn verify_password(&self, admin: &Admin, password: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(&admin.password_hash)
            .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

        let argon2 = Argon2::default();
        let result = argon2.verify_password(password.as_bytes(), &parsed_hash);

        Ok(result.is_ok())
    }

    /// Replace an admin's password hash
    pub async fn update_password(&self, admin_id: Uuid, new_password: &str) -> Result<()> {
        let password_hash = hash_password(new_password)?;

        sqlx::query("UPDATE admins SET password_hash = $2 WHERE id = $1")
            .bind(admin_id)
            .bind(&password_hash)
            .execute(&self.pool)
            .await?;

        info!("Password updated for admin {}", admin_id);
        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(password_hash)
}

fn admin_from_row(row: &sqlx::postgres::PgRow) -> Admin {
    Admin {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    }
}
