//! Availability models: blocked days and the public unavailable-day calendar

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::day_key::DayKeySettings;

/// An admin-declared day on which no bookings are accepted
#[derive(Debug, Clone)]
pub struct BlockedDay {
    pub id: Uuid,
    pub day_key: NaiveDate,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to block a day
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDayRequest {
    /// Any timestamp within the day, in epoch milliseconds
    pub date_ms: i64,
    pub reason: Option<String>,
}

/// Blocked day on the wire
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedDayResponse {
    pub id: Uuid,
    pub date_ms: i64,
    pub reason: Option<String>,
    pub created_at: i64,
}

impl BlockedDayResponse {
    pub fn from_blocked_day(blocked: &BlockedDay, days: &DayKeySettings) -> Self {
        BlockedDayResponse {
            id: blocked.id,
            date_ms: days.millis_from_day(blocked.day_key),
            reason: blocked.reason.clone(),
            created_at: blocked.created_at.timestamp_millis(),
        }
    }
}

/// Public calendar of days that cannot be booked
///
/// Blocked and booked days are indistinguishable here; no booking details
/// leave the server.
#[derive(Debug, Serialize)]
pub struct UnavailableDatesResponse {
    pub dates: Vec<i64>,
}
