//! Date helpers on [`chrono::DateTime`]
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use foundationkit_common::time::DateExt;
//!
//! let date = Utc.with_ymd_and_hms(2024, 3, 1, 9, 38, 12).unwrap();
//! assert_eq!(date.iso8601_string(), "2024-03-01T09:38:12Z");
//! assert_eq!(date.rounded(15).iso8601_string(), "2024-03-01T09:45:12Z");
//! ```

use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Timelike, Utc};

/// Convenience methods on dates
pub trait DateExt: Sized {
    /// UTC timestamp as `YYYY-MM-DDTHH:MM:SSZ`, fractional seconds dropped
    fn iso8601_string(&self) -> String;

    /// Date moved to a multiple of `minute_interval` minutes within the hour
    ///
    /// Rounds up only when the minutes past the previous multiple are
    /// strictly more than half the interval. Seconds are left as they are.
    /// A zero interval returns the date unchanged.
    #[must_use]
    fn rounded(&self, minute_interval: u32) -> Self;

    /// Round in place, see [`DateExt::rounded`]
    fn round(&mut self, minute_interval: u32) {
        *self = self.rounded(minute_interval);
    }
}

impl<Tz: TimeZone> DateExt for DateTime<Tz> {
    fn iso8601_string(&self) -> String {
        self.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    fn rounded(&self, minute_interval: u32) -> Self {
        if minute_interval == 0 {
            return self.clone();
        }

        let minutes = i64::from(self.minute());
        let interval = i64::from(minute_interval);
        let remainder = minutes % interval;
        let rounding = if remainder * 2 > interval { interval } else { 0 };
        let rounded_minutes = minutes / interval * interval;
        let offset = Duration::minutes(rounded_minutes + rounding - minutes);

        self.clone() + offset
    }
}

/// Parse a `YYYY-MM-DDTHH:MM:SSZ` (or any RFC 3339) timestamp into UTC
#[must_use]
pub fn parse_iso8601(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text).ok().map(|date| date.with_timezone(&Utc))
}
