//! Schedule time handling.
//!
//! Departure times arrive as "HH:MM" strings. This module provides a
//! date-aware time type so that adding leg and dwell durations stays
//! correctly ordered even when an itinerary runs past midnight.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day pinned to a calendar date.
///
/// Itinerary arithmetic needs both components: two stops at "09:30" are
/// different moments if a route rolls over midnight, and comparisons
/// must respect the date.
///
/// # Examples
///
/// ```
/// use sale_server::domain::ClockTime;
/// use chrono::NaiveDate;
///
/// let sale_day = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
/// let depart = ClockTime::parse_hhmm("08:30", sale_day).unwrap();
/// assert_eq!(depart.to_string(), "08:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    date: NaiveDate,
    time: NaiveTime,
}

impl ClockTime {
    /// Create a ClockTime from date and time components.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Parse a time in strict "HH:MM" format against a given date.
    ///
    /// # Examples
    ///
    /// ```
    /// use sale_server::domain::ClockTime;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
    ///
    /// assert!(ClockTime::parse_hhmm("00:00", day).is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59", day).is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("830", day).is_err());
    /// assert!(ClockTime::parse_hhmm("8:30", day).is_err());
    /// assert!(ClockTime::parse_hhmm("24:00", day).is_err());
    /// ```
    pub fn parse_hhmm(s: &str, date: NaiveDate) -> Result<Self, TimeError> {
        let (hh, mm) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;

        let hour = parse_padded(hh).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_padded(mm).ok_or_else(|| TimeError::new("invalid minute digits"))?;

        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self { date, time })
    }

    /// Returns the date component.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the time component.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Converts to a NaiveDateTime.
    pub fn to_datetime(&self) -> chrono::NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Add a duration, advancing the date when the sum crosses midnight.
    ///
    /// # Examples
    ///
    /// ```
    /// use sale_server::domain::ClockTime;
    /// use chrono::{Duration, NaiveDate};
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
    /// let t = ClockTime::parse_hhmm("23:40", day).unwrap();
    ///
    /// let later = t + Duration::minutes(35);
    /// assert_eq!(later.to_string(), "00:15");
    /// assert_eq!(later.date(), NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
    /// ```
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let dt = self.to_datetime().checked_add_signed(duration)?;
        Some(Self {
            date: dt.date(),
            time: dt.time(),
        })
    }

    /// Subtract a duration from this time.
    pub fn checked_sub(&self, duration: Duration) -> Option<Self> {
        let dt = self.to_datetime().checked_sub_signed(duration)?;
        Some(Self {
            date: dt.date(),
            time: dt.time(),
        })
    }

    /// Returns the duration between two times.
    ///
    /// Negative if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        self.to_datetime()
            .signed_duration_since(other.to_datetime())
    }
}

impl Add<Duration> for ClockTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        self.checked_add(rhs).expect("time overflow")
    }
}

impl Ord for ClockTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_datetime().cmp(&other.to_datetime())
    }
}

impl PartialOrd for ClockTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClockTime({} {:02}:{:02})",
            self.date,
            self.time.hour(),
            self.time.minute()
        )
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.time.hour(), self.time.minute())
    }
}

/// Parse a zero-padded two-digit ASCII component.
fn parse_padded(s: &str) -> Option<u32> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    prop_compose! {
        fn valid_time()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}:{:02}", hour, minute)
        }
    }

    prop_compose! {
        fn valid_date()(
            year in 2000i32..2100,
            month in 1u32..=12,
            day in 1u32..=28  // Safe for all months
        ) -> NaiveDate {
            NaiveDate::from_ymd_opt(year, month, day).unwrap()
        }
    }

    proptest! {
        /// Any valid HH:MM string parses successfully
        #[test]
        fn valid_hhmm_parses(time_str in valid_time(), date in valid_date()) {
            prop_assert!(ClockTime::parse_hhmm(&time_str, date).is_ok());
        }

        /// Parse then display roundtrips
        #[test]
        fn parse_display_roundtrip(time_str in valid_time(), date in valid_date()) {
            let parsed = ClockTime::parse_hhmm(&time_str, date).unwrap();
            prop_assert_eq!(parsed.to_string(), time_str);
        }

        /// Adding then subtracting the same duration returns the original
        #[test]
        fn add_sub_identity(
            time_str in valid_time(),
            date in valid_date(),
            minutes in 0i64..10_000
        ) {
            let t = ClockTime::parse_hhmm(&time_str, date).unwrap();
            let dur = Duration::minutes(minutes);

            if let Some(added) = t.checked_add(dur) {
                if let Some(back) = added.checked_sub(dur) {
                    prop_assert_eq!(t, back);
                }
            }
        }

        /// Adding a positive duration always moves the clock forward
        #[test]
        fn addition_is_monotonic(
            time_str in valid_time(),
            date in valid_date(),
            minutes in 1i64..10_000
        ) {
            let t = ClockTime::parse_hhmm(&time_str, date).unwrap();
            if let Some(later) = t.checked_add(Duration::minutes(minutes)) {
                prop_assert!(later > t);
            }
        }

        /// Duration between is consistent with ordering
        #[test]
        fn duration_ordering_consistent(
            h1 in 0u32..24, m1 in 0u32..60,
            h2 in 0u32..24, m2 in 0u32..60,
            date in valid_date()
        ) {
            let t1 = ClockTime::new(date, NaiveTime::from_hms_opt(h1, m1, 0).unwrap());
            let t2 = ClockTime::new(date, NaiveTime::from_hms_opt(h2, m2, 0).unwrap());

            let dur = t2.signed_duration_since(t1);

            match t1.cmp(&t2) {
                Ordering::Less => prop_assert!(dur > Duration::zero()),
                Ordering::Greater => prop_assert!(dur < Duration::zero()),
                Ordering::Equal => prop_assert!(dur == Duration::zero()),
            }
        }

        /// Invalid hour is rejected
        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60, date in valid_date()) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(ClockTime::parse_hhmm(&s, date).is_err());
        }

        /// Invalid minute is rejected
        #[test]
        fn invalid_minute_rejected(hour in 0u32..24, minute in 60u32..100, date in valid_date()) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(ClockTime::parse_hhmm(&s, date).is_err());
        }
    }
}
