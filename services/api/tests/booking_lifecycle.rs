//! Integration tests for the booking flow
//!
//! Covers day uniqueness, blocked-day exclusion, idempotent block/unblock,
//! status updates and session validation against a live database. They need
//! a provisioned DATABASE_URL and are ignored by default.

use api::day_key::DayKeySettings;
use api::models::booking::{BookingStatus, NewBooking};
use api::repositories::{
    SessionRepository, availability::AvailabilityRepository, booking::BookingRepository,
};
use chrono::{NaiveDate, TimeZone, Utc};
use common::database::{DatabaseConfig, init_pool, run_migrations};
use sqlx::PgPool;
use uuid::Uuid;

const UTC_DAYS: DayKeySettings = DayKeySettings { offset_minutes: 0 };

async fn setup() -> Result<PgPool, Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Each test works on its own calendar day; start it from a clean slate.
async fn clear_day(pool: &PgPool, day: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    sqlx::query("DELETE FROM bookings WHERE day_key = $1")
        .bind(day)
        .execute(pool)
        .await?;
    sqlx::query("DELETE FROM blocked_days WHERE day_key = $1")
        .bind(day)
        .execute(pool)
        .await?;

    Ok(())
}

fn booking_for(day: NaiveDate, name: &str, email: &str) -> NewBooking {
    NewBooking {
        name: name.to_string(),
        email: email.to_string(),
        phone: "0123456789".to_string(),
        day_key: day,
        package_name: Some("Gold".to_string()),
        user_agent: None,
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_one_booking_per_day() -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup().await?;
    let bookings = BookingRepository::new(pool.clone());
    let availability = AvailabilityRepository::new(pool.clone());

    // Two submissions on June 1st 2025, morning and evening, land on the
    // same day key.
    let morning = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let evening = Utc.with_ymd_and_hms(2025, 6, 1, 23, 59, 0).unwrap();
    let day = UTC_DAYS.day_from_millis(morning.timestamp_millis()).unwrap();
    assert_eq!(
        day,
        UTC_DAYS.day_from_millis(evening.timestamp_millis()).unwrap()
    );

    clear_day(&pool, day).await?;
    assert!(availability.is_day_available(day).await?);

    let first = bookings
        .insert_pending(&booking_for(day, "Jane Doe", "jane@example.com"))
        .await?
        .expect("free day must accept a booking");
    assert_eq!(first.status, BookingStatus::Pending);
    assert_eq!(first.day_key, day);

    assert!(!availability.is_day_available(day).await?);

    let second = bookings
        .insert_pending(&booking_for(day, "John Roe", "john@example.com"))
        .await?;
    assert!(second.is_none(), "the day is already taken");

    // The listing shows the surviving booking.
    let all = bookings.list_all().await?;
    assert!(all.iter().any(|b| b.id == first.id));

    clear_day(&pool, day).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_blocked_day_refuses_bookings() -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup().await?;
    let bookings = BookingRepository::new(pool.clone());
    let availability = AvailabilityRepository::new(pool.clone());

    let day = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
    clear_day(&pool, day).await?;

    let blocked = availability.block_day(day, Some("Holiday")).await?;
    assert_eq!(blocked.day_key, day);
    assert_eq!(blocked.reason.as_deref(), Some("Holiday"));

    assert!(!availability.is_day_available(day).await?);

    // The INSERT itself refuses the day even though no booking occupies it.
    let refused = bookings
        .insert_pending(&booking_for(day, "Jane Doe", "jane@example.com"))
        .await?;
    assert!(refused.is_none());

    let calendar = availability.unavailable_days().await?;
    assert!(calendar.contains(&day));

    assert!(availability.unblock_day(day).await?);
    assert!(availability.is_day_available(day).await?);

    // Unblocking again removes nothing and is not an error.
    assert!(!availability.unblock_day(day).await?);

    clear_day(&pool, day).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_blocking_twice_keeps_the_first_row() -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup().await?;
    let availability = AvailabilityRepository::new(pool.clone());

    let day = NaiveDate::from_ymd_opt(2025, 9, 20).unwrap();
    clear_day(&pool, day).await?;

    let first = availability.block_day(day, Some("Maintenance")).await?;
    let second = availability.block_day(day, Some("Vacation")).await?;

    assert_eq!(first.id, second.id);
    assert_eq!(second.reason.as_deref(), Some("Maintenance"));

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blocked_days WHERE day_key = $1")
        .bind(day)
        .fetch_one(&pool)
        .await?;
    assert_eq!(rows, 1);

    clear_day(&pool, day).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_status_moves_freely_within_the_vocabulary() -> Result<(), Box<dyn std::error::Error>>
{
    let pool = setup().await?;
    let bookings = BookingRepository::new(pool.clone());

    let day = NaiveDate::from_ymd_opt(2025, 10, 8).unwrap();
    clear_day(&pool, day).await?;

    let booking = bookings
        .insert_pending(&booking_for(day, "Jane Doe", "jane@example.com"))
        .await?
        .expect("free day must accept a booking");

    // Any status may follow any other, including moving backwards.
    for status in [
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
        BookingStatus::Pending,
    ] {
        let updated = bookings
            .update_status(booking.id, status)
            .await?
            .expect("booking exists");
        assert_eq!(updated.status, status);
        assert!(updated.updated_at >= booking.updated_at);
    }

    // A cancelled booking still occupies its day.
    bookings
        .update_status(booking.id, BookingStatus::Cancelled)
        .await?;
    let refused = bookings
        .insert_pending(&booking_for(day, "John Roe", "john@example.com"))
        .await?;
    assert!(refused.is_none());

    let missing = bookings
        .update_status(Uuid::new_v4(), BookingStatus::Confirmed)
        .await?;
    assert!(missing.is_none());

    clear_day(&pool, day).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_session_validation_rejects_expired_tokens() -> Result<(), Box<dyn std::error::Error>>
{
    let pool = setup().await?;
    let sessions = SessionRepository::new(pool.clone());

    assert!(sessions.validate("no-such-token").await?.is_none());

    let email = format!("api-session-{}@example.com", Uuid::new_v4().simple());
    let admin_id: Uuid =
        sqlx::query_scalar("INSERT INTO admins (email, password_hash) VALUES ($1, 'x') RETURNING id")
            .bind(&email)
            .fetch_one(&pool)
            .await?;

    let expired_token = format!("expired-{}", Uuid::new_v4().simple());
    let live_token = format!("live-{}", Uuid::new_v4().simple());
    sqlx::query(
        r#"
        INSERT INTO sessions (admin_id, token, expires_at)
        VALUES ($1, $2, NOW() - INTERVAL '1 hour'),
               ($1, $3, NOW() + INTERVAL '1 hour')
        "#,
    )
    .bind(admin_id)
    .bind(&expired_token)
    .bind(&live_token)
    .execute(&pool)
    .await?;

    assert!(sessions.validate(&expired_token).await?.is_none());

    let identity = sessions
        .validate(&live_token)
        .await?
        .expect("live session must validate");
    assert_eq!(identity.admin_id, admin_id);
    assert_eq!(identity.email, email);

    sqlx::query("DELETE FROM admins WHERE id = $1")
        .bind(admin_id)
        .execute(&pool)
        .await?;
    Ok(())
}
