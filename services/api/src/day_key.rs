//! Calendar-day normalization for booking and blocking
//!
//! A booking occupies a whole calendar day, so every incoming
//! epoch-millisecond timestamp is truncated to the date it falls on before
//! lookup or storage. Two submissions for the same day at different times
//! collide on the same key. The day boundary follows a fixed UTC offset so
//! it never depends on the timezone of the machine running the service.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Day-boundary settings
#[derive(Debug, Clone, Copy)]
pub struct DayKeySettings {
    /// Fixed offset from UTC, in minutes, defining where calendar days begin
    pub offset_minutes: i32,
}

impl DayKeySettings {
    /// Create day-key settings from environment variables
    ///
    /// # Environment Variables
    /// - `BOOKING_DAY_OFFSET_MINUTES`: fixed UTC offset in minutes (default: 0)
    pub fn from_env() -> Self {
        let offset_minutes = std::env::var("BOOKING_DAY_OFFSET_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);

        DayKeySettings { offset_minutes }
    }

    /// Truncate an epoch-millisecond timestamp to the calendar day it falls on
    ///
    /// Returns `None` when the timestamp is outside the representable range.
    pub fn day_from_millis(&self, millis: i64) -> Option<NaiveDate> {
        let instant = DateTime::<Utc>::from_timestamp_millis(millis)?;
        let shifted = instant.checked_add_signed(Duration::minutes(self.offset_minutes as i64))?;

        Some(shifted.date_naive())
    }

    /// Render a calendar day back to the wire as its local midnight, in
    /// epoch milliseconds
    pub fn millis_from_day(&self, day: NaiveDate) -> i64 {
        let midnight = Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN));

        (midnight - Duration::minutes(self.offset_minutes as i64)).timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const UTC_DAYS: DayKeySettings = DayKeySettings { offset_minutes: 0 };

    fn millis(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn test_times_within_one_day_share_a_key() {
        let late = UTC_DAYS.day_from_millis(millis(2025, 3, 10, 23, 59, 0)).unwrap();
        let early = UTC_DAYS.day_from_millis(millis(2025, 3, 10, 0, 0, 1)).unwrap();

        assert_eq!(late, early);
        assert_eq!(late, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }

    #[test]
    fn test_midnight_starts_a_new_day() {
        let before = UTC_DAYS.day_from_millis(millis(2025, 3, 10, 23, 59, 59)).unwrap();
        let midnight = UTC_DAYS.day_from_millis(millis(2025, 3, 11, 0, 0, 0)).unwrap();

        assert_ne!(before, midnight);
        assert_eq!(midnight, NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
    }

    #[test]
    fn test_offset_moves_the_day_boundary() {
        // 23:30 UTC is already the next day in a UTC+2 deployment.
        let ts = millis(2025, 6, 1, 23, 30, 0);

        let utc_plus_two = DayKeySettings { offset_minutes: 120 };
        assert_eq!(
            utc_plus_two.day_from_millis(ts).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
        );
        assert_eq!(
            UTC_DAYS.day_from_millis(ts).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_millis_round_trip_lands_on_the_same_day() {
        for offset in [-600, 0, 120, 330] {
            let settings = DayKeySettings { offset_minutes: offset };
            let day = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();

            let rendered = settings.millis_from_day(day);
            assert_eq!(settings.day_from_millis(rendered).unwrap(), day);
        }
    }

    #[test]
    fn test_rendered_millis_are_local_midnight() {
        let utc_plus_two = DayKeySettings { offset_minutes: 120 };
        let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();

        // Local midnight on June 2nd in UTC+2 is 22:00 UTC on June 1st.
        assert_eq!(utc_plus_two.millis_from_day(day), millis(2025, 6, 1, 22, 0, 0));
    }

    #[test]
    fn test_out_of_range_timestamp_is_rejected() {
        assert!(UTC_DAYS.day_from_millis(i64::MAX).is_none());
        assert!(UTC_DAYS.day_from_millis(i64::MIN).is_none());
    }

    #[test]
    #[serial]
    fn test_settings_default_to_utc() {
        unsafe {
            std::env::remove_var("BOOKING_DAY_OFFSET_MINUTES");
        }

        assert_eq!(DayKeySettings::from_env().offset_minutes, 0);
    }

    #[test]
    #[serial]
    fn test_settings_offset_override() {
        unsafe {
            std::env::set_var("BOOKING_DAY_OFFSET_MINUTES", "-300");
        }

        assert_eq!(DayKeySettings::from_env().offset_minutes, -300);

        unsafe {
            std::env::remove_var("BOOKING_DAY_OFFSET_MINUTES");
        }
    }
}
