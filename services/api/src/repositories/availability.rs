//! Availability ledger: blocked days and the booked-day calendar

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::availability::BlockedDay;

/// Availability repository
#[derive(Clone)]
pub struct AvailabilityRepository {
    pool: PgPool,
}

impl AvailabilityRepository {
    /// Create a new availability repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether a day can accept a new booking
    ///
    /// A day is unavailable when it is blocked or when any booking already
    /// occupies it, whatever that booking's status.
    pub async fn is_day_available(&self, day: NaiveDate) -> Result<bool> {
        let available: bool = sqlx::query_scalar(
            r#"
            SELECT NOT EXISTS (SELECT 1 FROM blocked_days WHERE day_key = $1)
               AND NOT EXISTS (SELECT 1 FROM bookings WHERE day_key = $1)
            "#,
        )
        .bind(day)
        .fetch_one(&self.pool)
        .await?;

        Ok(available)
    }

    /// Block a day; blocking an already-blocked day returns the existing row
    pub async fn block_day(&self, day: NaiveDate, reason: Option<&str>) -> Result<BlockedDay> {
        let row = sqlx::query(
            r#"
            INSERT INTO blocked_days (day_key, reason)
            VALUES ($1, $2)
            ON CONFLICT (day_key) DO NOTHING
            RETURNING id, day_key, reason, created_at
            "#,
        )
        .bind(day)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            info!("Blocked day {}", day);
            return Ok(blocked_day_from_row(&row));
        }

        // Already blocked; hand back the row that won.
        let row = sqlx::query("SELECT id, day_key, reason, created_at FROM blocked_days WHERE day_key = $1")
            .bind(day)
            .fetch_one(&self.pool)
            .await?;

        Ok(blocked_day_from_row(&row))
    }

    /// Unblock a day; returns whether a row was removed. Unblocking a day
    /// that was never blocked is a no-op, not an error.
    pub async fn unblock_day(&self, day: NaiveDate) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blocked_days WHERE day_key = $1")
            .bind(day)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!("Unblocked day {}", day);
        }

        Ok(removed)
    }

    /// Every day the public calendar must show as unavailable: the union of
    /// blocked days and booked days, sorted
    pub async fn unavailable_days(&self) -> Result<Vec<NaiveDate>> {
        let rows = sqlx::query(
            r#"
            SELECT day_key FROM blocked_days
            UNION
            SELECT day_key FROM bookings
            ORDER BY day_key
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|row| row.get("day_key")).collect())
    }
}

fn blocked_day_from_row(row: &sqlx::postgres::PgRow) -> BlockedDay {
    BlockedDay {
        id: row.get("id"),
        day_key: row.get("day_key"),
        reason: row.get("reason"),
        created_at: row.get("created_at"),
    }
}
