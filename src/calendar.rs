//! # Calendar Adapter
//!
//! Conversions between continuous Julian day numbers and civil dates. The
//! Julian day is the universal time coordinate used for queries against a
//! stream index, independent of any file's own calendar unit. All calendar
//! arithmetic (leap years, month lengths) is delegated to `chrono`; this
//! module only anchors it to the Julian day scale via the Unix epoch.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{StreamError, StreamResult};

/// Julian day number of the Unix epoch (1970-01-01 00:00:00 UTC).
pub const UNIX_EPOCH_JULIAN: f64 = 2440587.5;

const SECONDS_PER_DAY: f64 = 86400.0;

/// Converts a civil date/time (interpreted as UTC) to a Julian day number.
pub fn date_to_julian(date: NaiveDateTime) -> f64 {
    let seconds = date.and_utc().timestamp() as f64;
    let subsec = date.and_utc().timestamp_subsec_nanos() as f64 * 1e-9;
    UNIX_EPOCH_JULIAN + (seconds + subsec) / SECONDS_PER_DAY
}

/// Converts a Julian day number back to a civil date/time, rounded to the
/// nearest second. Returns `None` for values outside chrono's representable
/// range.
pub fn julian_to_date(julian_day: f64) -> Option<NaiveDateTime> {
    let seconds = ((julian_day - UNIX_EPOCH_JULIAN) * SECONDS_PER_DAY).round() as i64;
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.naive_utc())
}

/// Formats a Julian day number as `yyyy-mm-dd hh:mm:ss` for diagnostics.
pub fn julian_to_datestring(julian_day: f64) -> String {
    match julian_to_date(julian_day) {
        Some(date) => date.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format!("<julian day {julian_day} out of range>"),
    }
}

/// Parses a date/time string in any of the forms `yyyy-mm-dd hh:mm:ss`,
/// `yyyy-mm-ddThh:mm:ss` or bare `yyyy-mm-dd` (midnight assumed). Unpadded
/// month/day/hour fields are accepted, since unit strings in the wild often
/// carry dates like `2001-1-1`.
pub fn parse_datetime(text: &str) -> StreamResult<NaiveDateTime> {
    let text = text.trim();
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(date);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    Err(StreamError::InvalidDate(text.to_string()))
}

/// Parses a date/time string directly to a Julian day number.
pub fn datestring_to_julian(text: &str) -> StreamResult<f64> {
    Ok(date_to_julian(parse_datetime(text)?))
}
