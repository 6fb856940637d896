//! Date-string parsing against an ordered list of candidate formats.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::Error;

/// Default format for `start_time` / `end_time` boundary strings.
pub const DEFAULT_TIME_RANGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a date string by trying each chrono format in order; the first match
/// wins. Parsing is strict: the whole value must match the format, and no
/// timezone is guessed beyond what the format encodes. Formats without an
/// offset are interpreted as UTC.
pub fn parse_date_str(value: &str, formats: &[&str]) -> Result<DateTime<Utc>, Error> {
    for format in formats {
        // Offset-aware formats (%z and friends) resolve to the encoded
        // instant; all others are naive and taken as UTC.
        if let Ok(datetime) = DateTime::parse_from_str(value, format) {
            return Ok(datetime.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
        // Date-only formats default the time of day to midnight.
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)));
        }
    }
    Err(Error::config(format!(
        "Unsupported DateTime value: '{}', supported formats: [{}]",
        value,
        formats.join(",")
    )))
}
