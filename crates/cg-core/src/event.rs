//! Location-transition events and their normalization from raw rows.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::event_type::EventKind;
use crate::location::Location;
use crate::time::{TimestampError, parse_instant};
use crate::types::SubjectId;

/// One row of the presence log, exactly as the record source delivers it.
///
/// Fields are matched by column name. Coordinates are optional and carried
/// through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawEventRow {
    pub user_id: String,
    pub location_name: String,
    #[serde(default)]
    pub coordinates_latitude: String,
    #[serde(default)]
    pub coordinates_longitude: String,
    pub timestamp: String,
    pub event_type: String,
}

/// Errors raised while turning a raw row into an [`EventRecord`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The row's timestamp is not a calendar instant.
    #[error(transparent)]
    InvalidTimestamp(#[from] TimestampError),
}

/// Latitude and longitude as written in the log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

/// A typed location transition for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub subject_id: SubjectId,
    pub location: Location,
    pub kind: EventKind,
    pub timestamp: DateTime<Utc>,
    pub coordinates: Coordinates,
}

impl EventRecord {
    /// Converts a raw row, classifying its location against `home_label`.
    ///
    /// Only the timestamp is validated. The subject is copied as-is, empty or
    /// not, and unknown event tags are kept as [`EventKind::Other`].
    pub fn normalize(row: RawEventRow, home_label: &str) -> Result<Self, NormalizeError> {
        let timestamp = parse_instant(&row.timestamp)?;

        Ok(Self {
            subject_id: SubjectId::from(row.user_id),
            location: Location::classify(&row.location_name, home_label),
            kind: EventKind::from(row.event_type.as_str()),
            timestamp,
            coordinates: Coordinates {
                latitude: row.coordinates_latitude,
                longitude: row.coordinates_longitude,
            },
        })
    }
}
