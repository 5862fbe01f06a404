//! Booking models for the API service

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::day_key::DayKeySettings;

/// Lifecycle status of a booking
///
/// The enum only fixes the vocabulary; any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Parse a wire value; anything outside the vocabulary is `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            "completed" => Some(BookingStatus::Completed),
            _ => None,
        }
    }

    /// The stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking entity
///
/// Created by a public submission, mutated only by admin status updates,
/// never deleted (the table is the audit trail).
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub day_key: NaiveDate,
    pub package_name: Option<String>,
    pub user_agent: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New booking payload, already normalized to a day key
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub day_key: NaiveDate,
    pub package_name: Option<String>,
    pub user_agent: Option<String>,
}

/// Request for a public booking submission
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Desired day as an epoch-millisecond timestamp
    pub desired_date: i64,
    pub package_name: Option<String>,
    pub user_agent: Option<String>,
}

/// Request for an admin status change
///
/// The status arrives as a plain string so an unknown value can be refused
/// as `InvalidStatus` instead of a generic deserialization failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Booking on the wire
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Booked day as its local midnight, in epoch milliseconds
    pub date_ms: i64,
    pub package_name: Option<String>,
    pub user_agent: Option<String>,
    pub status: BookingStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl BookingResponse {
    pub fn from_booking(booking: &Booking, days: &DayKeySettings) -> Self {
        BookingResponse {
            id: booking.id,
            name: booking.name.clone(),
            email: booking.email.clone(),
            phone: booking.phone.clone(),
            date_ms: days.millis_from_day(booking.day_key),
            package_name: booking.package_name.clone(),
            user_agent: booking.user_agent.clone(),
            status: booking.status,
            created_at: booking.created_at.timestamp_millis(),
            updated_at: booking.updated_at.timestamp_millis(),
        }
    }
}
