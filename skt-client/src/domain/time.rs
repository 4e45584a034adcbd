//! Provider time handling.
//!
//! SKT reports times as `<date>T<time>` strings such as
//! `"2024-03-15T14:30:00"`, with no UTC offset. They are Swedish local time,
//! so this module keeps them as naive local date-times instead of guessing
//! an offset.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

/// Error returned when parsing an invalid provider time string.
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

/// A local date and time reported by the provider.
///
/// # Examples
///
/// ```
/// use skt_client::domain::ProviderTime;
///
/// let time = ProviderTime::parse("2024-03-15T14:30:00").unwrap();
/// assert_eq!(time.hour(), 14);
/// assert_eq!(time.to_string(), "2024-03-15T14:30:00");
///
/// // The date/time separator is required
/// assert!(ProviderTime::parse("2024-03-15 14:30:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProviderTime {
    date: NaiveDate,
    time: NaiveTime,
}

impl ProviderTime {
    /// Parse a `<date>T<time>` string.
    ///
    /// The date must be `YYYY-MM-DD` and the time `HH:MM:SS` or `HH:MM`.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let (date, time) = s
            .split_once('T')
            .ok_or_else(|| TimeError::new("expected <date>T<time>"))?;
        Self::from_parts(date, time)
    }

    /// Parse separate date and time tokens.
    pub fn from_parts(date: &str, time: &str) -> Result<Self, TimeError> {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| TimeError::new("expected YYYY-MM-DD date"))?;
        let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
            .map_err(|_| TimeError::new("expected HH:MM:SS or HH:MM time"))?;

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

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// Converts to a NaiveDateTime.
    pub fn to_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Add a (possibly negative) duration, crossing midnight as needed.
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let dt = self.to_datetime().checked_add_signed(duration)?;
        Some(Self {
            date: dt.date(),
            time: dt.time(),
        })
    }

    /// Returns the duration between two times.
    ///
    /// Returns a negative duration if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        self.to_datetime()
            .signed_duration_since(other.to_datetime())
    }
}

impl fmt::Debug for ProviderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProviderTime({} {})", self.date, self.time)
    }
}

impl fmt::Display for ProviderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_datetime().format("%Y-%m-%dT%H:%M:%S"))
    }
}

impl Serialize for ProviderTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_full_time() {
        let t = ProviderTime::parse("2024-03-15T14:30:45").unwrap();
        assert_eq!(t.date(), date(2024, 3, 15));
        assert_eq!(t.hour(), 14);
        assert_eq!(t.minute(), 30);
        assert_eq!(t.time().second(), 45);
    }

    #[test]
    fn parse_without_seconds() {
        let t = ProviderTime::parse("2024-03-15T07:05").unwrap();
        assert_eq!(t.hour(), 7);
        assert_eq!(t.minute(), 5);
        assert_eq!(t.time().second(), 0);
    }

    #[test]
    fn reject_missing_separator() {
        assert!(ProviderTime::parse("2024-03-15 14:30:00").is_err());
        assert!(ProviderTime::parse("2024-03-15").is_err());
        assert!(ProviderTime::parse("").is_err());
    }

    #[test]
    fn reject_malformed_tokens() {
        assert!(ProviderTime::parse("T14:30:00").is_err());
        assert!(ProviderTime::parse("2024-03-15T").is_err());
        assert!(ProviderTime::parse("2024-13-15T14:30:00").is_err());
        assert!(ProviderTime::parse("2024-03-15T25:00:00").is_err());
        assert!(ProviderTime::parse("15/03/2024T14:30:00").is_err());
        assert!(ProviderTime::parse("2024-03-15T14h30").is_err());
    }

    #[test]
    fn from_parts_matches_parse() {
        assert_eq!(
            ProviderTime::from_parts("2024-03-15", "14:30:00").unwrap(),
            ProviderTime::parse("2024-03-15T14:30:00").unwrap()
        );
    }

    #[test]
    fn display_is_iso_local() {
        let t = ProviderTime::parse("2024-03-15T09:05").unwrap();
        assert_eq!(t.to_string(), "2024-03-15T09:05:00");
        assert_eq!(format!("{:?}", t), "ProviderTime(2024-03-15 09:05:00)");
    }

    #[test]
    fn serializes_as_string() {
        let t = ProviderTime::parse("2024-03-15T09:05:00").unwrap();
        assert_eq!(
            serde_json::to_string(&t).unwrap(),
            r#""2024-03-15T09:05:00""#
        );
    }

    #[test]
    fn add_crosses_midnight() {
        let t = ProviderTime::parse("2024-03-15T23:50:00").unwrap();
        let later = t.checked_add(Duration::minutes(15)).unwrap();
        assert_eq!(later.date(), date(2024, 3, 16));
        assert_eq!(later.to_string(), "2024-03-16T00:05:00");
    }

    #[test]
    fn ordering_spans_dates() {
        let late = ProviderTime::parse("2024-03-15T23:00:00").unwrap();
        let early_next = ProviderTime::parse("2024-03-16T01:00:00").unwrap();
        assert!(late < early_next);
        assert_eq!(
            early_next.signed_duration_since(late),
            Duration::hours(2)
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time_string()(
            year in 2000i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            hour in 0u32..24,
            minute in 0u32..60,
            second in 0u32..60,
        ) -> String {
            format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}")
        }
    }

    proptest! {
        /// Parse then display roundtrips
        #[test]
        fn parse_display_roundtrip(s in valid_time_string()) {
            let parsed = ProviderTime::parse(&s).unwrap();
            prop_assert_eq!(parsed.to_string(), s);
        }

        /// Strings without the separator never parse
        #[test]
        fn missing_separator_rejected(s in "[0-9:\\- ]{0,20}") {
            prop_assert!(ProviderTime::parse(&s).is_err());
        }

        /// Adding then subtracting a duration returns the original time
        #[test]
        fn add_sub_identity(s in valid_time_string(), minutes in -2000i64..2000) {
            let t = ProviderTime::parse(&s).unwrap();
            let back = t
                .checked_add(Duration::minutes(minutes))
                .and_then(|later| later.checked_add(Duration::minutes(-minutes)));
            prop_assert_eq!(back, Some(t));
        }
    }
}
