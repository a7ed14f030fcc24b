//! Instant parsing and minute arithmetic shared by normalization and the fold.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use thiserror::Error;

const MS_PER_MINUTE: i64 = 60_000;

/// Offset-less date-time layouts, read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// A timestamp text that does not denote a calendar instant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid timestamp {input:?}, expected ISO 8601 (e.g., 2024-01-01T09:00:00Z)")]
pub struct TimestampError {
    input: String,
}

impl TimestampError {
    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Parse an instant from ISO 8601 text.
///
/// Supports:
/// - RFC 3339 with offset: "2024-01-01T09:00:00Z", "2024-01-01T11:00:00+02:00"
/// - date-time without offset, taken as UTC: "2024-01-01T09:00:00", "2024-01-01 09:00:00"
/// - date only, taken as UTC midnight: "2024-01-01"
///
/// Offset-less texts are never read in the host's local time zone, so the same
/// log and window give the same report on every machine.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(TimestampError {
        input: s.to_string(),
    })
}

/// Whole minutes between two instants, always rounded up.
///
/// A zero-length gap is 0 minutes; 1 ms is already 1 minute.
pub fn elapsed_minutes(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let ms = (later - earlier).num_milliseconds();
    ms.div_euclid(MS_PER_MINUTE) + i64::from(ms.rem_euclid(MS_PER_MINUTE) != 0)
}
