//! Application state shared across handlers

use crate::{
    day_key::DayKeySettings,
    repositories::{
        SessionRepository, availability::AvailabilityRepository, booking::BookingRepository,
        content::ContentRepository,
    },
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub session_repository: SessionRepository,
    pub booking_repository: BookingRepository,
    pub availability_repository: AvailabilityRepository,
    pub content_repository: ContentRepository,
    pub day_keys: DayKeySettings,
}
