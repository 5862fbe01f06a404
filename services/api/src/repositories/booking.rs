//! Booking repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus, NewBooking};

/// Booking repository
#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new pending booking, returning `None` when the day cannot
    /// take it
    ///
    /// The statement itself refuses blocked days, and the UNIQUE constraint
    /// on `day_key` decides races between concurrent submissions for the
    /// same day. The availability pre-check in the handler is only a fast
    /// path; this is where the invariant is enforced.
    pub async fn insert_pending(&self, booking: &NewBooking) -> Result<Option<Booking>> {
        let result = sqlx::query(
            r#"
            INSERT INTO bookings (name, email, phone, day_key, package_name, user_agent)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE NOT EXISTS (SELECT 1 FROM blocked_days WHERE day_key = $4)
            RETURNING id, name, email, phone, day_key, package_name, user_agent,
                      status, created_at, updated_at
            "#,
        )
        .bind(&booking.name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(booking.day_key)
        .bind(&booking.package_name)
        .bind(&booking.user_agent)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(row)) => {
                info!("Booking created for {}", booking.day_key);
                Ok(Some(booking_from_row(&row)?))
            }
            // The day is blocked.
            Ok(None) => Ok(None),
            // Another booking holds the day; the first insert won.
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All bookings, newest first
    pub async fn list_all(&self) -> Result<Vec<Booking>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, phone, day_key, package_name, user_agent,
                   status, created_at, updated_at
            FROM bookings
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(booking_from_row).collect()
    }

    /// Set a booking's status; returns `None` for an unknown id
    pub async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<Option<Booking>> {
        let row = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, phone, day_key, package_name, user_agent,
                      status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(booking_from_row).transpose()
    }
}

fn booking_from_row(row: &sqlx::postgres::PgRow) -> Result<Booking> {
    let status: String = row.get("status");
    let status = BookingStatus::parse(&status)
        .ok_or_else(|| anyhow::anyhow!("Unknown booking status in database: {}", status))?;

    Ok(Booking {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        day_key: row.get("day_key"),
        package_name: row.get("package_name"),
        user_agent: row.get("user_agent"),
        status,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
