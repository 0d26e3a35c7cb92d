//! # Time Unit Parsing
//!
//! CF-convention time unit strings (`"<unit> since <date> [<time>]"`) are
//! parsed into a [`CalendarUnit`]: a scale factor to canonical days plus the
//! base instant the file's time values count from. A `CalendarUnit` is
//! created once per dataset open and is immutable thereafter.

use chrono::NaiveDateTime;
use log::warn;

use crate::calendar::parse_datetime;
use crate::error::{StreamError, StreamResult};

const DAYS_PER_YEAR: f64 = 365.2425;

/// Recognized calendar unit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
    Months,
    Years,
}

impl TimeUnit {
    /// Multiplier converting one unit to days. Months and years use a fixed
    /// 365.2425-day year, a known precision limitation.
    pub fn scale_to_days(self) -> f64 {
        match self {
            TimeUnit::Days => 1.0,
            TimeUnit::Hours => 1.0 / 24.0,
            TimeUnit::Minutes => 1.0 / 24.0 / 60.0,
            TimeUnit::Seconds => 1.0 / 24.0 / 3600.0,
            TimeUnit::Months => DAYS_PER_YEAR / 12.0,
            TimeUnit::Years => DAYS_PER_YEAR,
        }
    }
}

/// A parsed time unit: unit word, scale to canonical days, and base instant.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarUnit {
    pub unit: TimeUnit,
    pub scale_to_days: f64,
    pub base: NaiveDateTime,
}

impl CalendarUnit {
    /// Parses a unit string of the form `"<unit> since <date> [<time>]"`.
    ///
    /// Unit words are matched case-sensitively. An unrecognized unit word is
    /// treated as days (scale 1) with a warning; this preserves compatibility
    /// with datasets that rely on the historical default, while making the
    /// fallback observable in the log.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::MalformedUnit`] if the literal token `since` is
    /// not in the expected position, or if the base date cannot be parsed.
    pub fn parse(unit_str: &str) -> StreamResult<Self> {
        let mut tokens = unit_str.split_whitespace();
        let unit_word = tokens
            .next()
            .ok_or_else(|| StreamError::MalformedUnit(unit_str.to_string()))?;
        let since = tokens.next().unwrap_or("");
        if since != "since" {
            return Err(StreamError::MalformedUnit(unit_str.to_string()));
        }

        let unit = match unit_word {
            "days" => TimeUnit::Days,
            "hours" => TimeUnit::Hours,
            "minutes" => TimeUnit::Minutes,
            "seconds" => TimeUnit::Seconds,
            "months" => TimeUnit::Months,
            "years" => TimeUnit::Years,
            other => {
                warn!("unrecognized time unit '{other}', treating values as days");
                TimeUnit::Days
            }
        };

        if matches!(unit, TimeUnit::Months | TimeUnit::Years) {
            warn!(
                "time unit '{unit_word}' uses a fixed {DAYS_PER_YEAR}-day year; \
                 dates may be off by up to a few days"
            );
        }

        let base_str: String = tokens.collect::<Vec<_>>().join(" ");
        let base = parse_datetime(&base_str)
            .map_err(|_| StreamError::MalformedUnit(unit_str.to_string()))?;

        Ok(CalendarUnit {
            unit,
            scale_to_days: unit.scale_to_days(),
            base,
        })
    }
}
