//! # Store Calendar
//!
//! Rules gated by the current local time: business hours and the annual
//! holiday promotion.
//!
//! The current time always comes from outside, either as a value or through
//! the [`Clock`] trait. The system clock implementation lives in
//! storefront-services; [`FixedClock`] here pins time for tests.
//!
//! ## Business Hours
//! ```text
//!   07:59   08:00   08:01 ............ 19:59   20:00   20:01
//!  closed  closed   open               open   closed  closed
//! ```
//! Compared at minute resolution; the opening and closing minutes themselves
//! are outside the window.

use chrono::{Datelike, NaiveDateTime, Timelike};
use std::sync::Mutex;
use tracing::debug;

use crate::config::{HolidayPromotion, StoreHours};

// =============================================================================
// Clock
// =============================================================================

/// Source of the current local time.
pub trait Clock: Send + Sync {
    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// A clock that returns whatever time it was last set to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    /// Creates a clock pinned to `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        FixedClock {
            now: Mutex::new(now),
        }
    }

    /// Creates a clock from `"YYYY-MM-DD HH:MM"`.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::schedule::{Clock, FixedClock};
    ///
    /// let clock = FixedClock::parse("2024-12-25 00:00").unwrap();
    /// assert_eq!(clock.now().to_string(), "2024-12-25 00:00:00");
    /// ```
    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        Ok(FixedClock::new(parse_local(value)?))
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Parses `"YYYY-MM-DD HH:MM"` as a local date-time.
pub fn parse_local(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
}

// =============================================================================
// Store Calendar
// =============================================================================

/// Business hours plus the annual promotion day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreCalendar {
    hours: StoreHours,
    promotion: HolidayPromotion,
}

impl StoreCalendar {
    pub fn new(hours: StoreHours, promotion: HolidayPromotion) -> Self {
        StoreCalendar { hours, promotion }
    }

    /// Whether `now` falls strictly inside the opening window.
    pub fn is_open_at(&self, now: NaiveDateTime) -> bool {
        let minute = now.hour() * 60 + now.minute();
        let open = self.hours.open_hour * 60;
        let close = self.hours.close_hour * 60;

        let is_open = minute > open && minute < close;
        debug!(%now, is_open, "Evaluated business hours");
        is_open
    }

    /// Promotion discount for `now`: the configured fraction on the
    /// promotion day (any time of day), otherwise 0.
    pub fn discount_at(&self, now: NaiveDateTime) -> f64 {
        if now.month() == self.promotion.month && now.day() == self.promotion.day {
            debug!(%now, discount = self.promotion.discount, "Holiday promotion active");
            self.promotion.discount
        } else {
            0.0
        }
    }

    /// [`Self::is_open_at`] for the clock's current time.
    pub fn is_open(&self, clock: &dyn Clock) -> bool {
        self.is_open_at(clock.now())
    }

    /// [`Self::discount_at`] for the clock's current time.
    pub fn discount(&self, clock: &dyn Clock) -> f64 {
        self.discount_at(clock.now())
    }
}

impl Default for StoreCalendar {
    fn default() -> Self {
        StoreCalendar::new(StoreHours::default(), HolidayPromotion::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(value: &str) -> NaiveDateTime {
        parse_local(value).unwrap()
    }

    #[test]
    fn test_closed_outside_opening_hours() {
        let calendar = StoreCalendar::default();
        assert!(!calendar.is_open_at(at("2025-09-15 07:59")));
        assert!(!calendar.is_open_at(at("2025-09-15 20:01")));
        assert!(!calendar.is_open_at(at("2025-09-15 00:00")));
    }

    #[test]
    fn test_open_within_opening_hours() {
        let calendar = StoreCalendar::default();
        assert!(calendar.is_open_at(at("2025-09-15 08:01")));
        assert!(calendar.is_open_at(at("2025-09-15 12:30")));
        assert!(calendar.is_open_at(at("2025-09-15 19:59")));
    }

    #[test]
    fn test_custom_hours() {
        let hours = StoreHours {
            open_hour: 10,
            close_hour: 18,
        };
        let calendar = StoreCalendar::new(hours, HolidayPromotion::default());
        assert!(!calendar.is_open_at(at("2025-09-15 09:30")));
        assert!(calendar.is_open_at(at("2025-09-15 10:01")));
        assert!(!calendar.is_open_at(at("2025-09-15 18:30")));
    }

    #[test]
    fn test_discount_on_promotion_day() {
        let calendar = StoreCalendar::default();
        assert_eq!(calendar.discount_at(at("2024-12-25 00:00")), 0.2);
        assert_eq!(calendar.discount_at(at("2024-12-25 23:59")), 0.2);
    }

    #[test]
    fn test_no_discount_on_other_days() {
        let calendar = StoreCalendar::default();
        assert_eq!(calendar.discount_at(at("2024-12-24 00:01")), 0.0);
        assert_eq!(calendar.discount_at(at("2024-12-26 00:01")), 0.0);
        assert_eq!(calendar.discount_at(at("2024-11-25 12:00")), 0.0);
    }

    #[test]
    fn test_fixed_clock_can_be_moved() {
        let calendar = StoreCalendar::default();
        let clock = FixedClock::parse("2024-12-25 00:00").unwrap();
        assert_eq!(calendar.discount(&clock), 0.2);

        clock.set(at("2024-12-26 00:01"));
        assert_eq!(calendar.discount(&clock), 0.0);
        assert!(!calendar.is_open(&clock));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(FixedClock::parse("christmas").is_err());
    }
}
