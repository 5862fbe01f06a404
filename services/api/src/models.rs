//! API models for request and response payloads
//!
//! Database rows keep their snake_case field names; everything that crosses
//! the wire is camelCase.

use uuid::Uuid;

pub mod availability;
pub mod booking;
pub mod content;

/// Identity attached to a validated admin session
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub admin_id: Uuid,
    pub email: String,
}
