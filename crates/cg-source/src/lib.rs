//! Record source for presence logs.
//!
//! Reads location-transition rows from comma-delimited text with a header row.
//!
//! # Schema
//!
//! Columns are matched by header name, so their order is free:
//!
//! | column                  | required | meaning                         |
//! |-------------------------|----------|---------------------------------|
//! | `user_id`               | yes      | subject identifier              |
//! | `location_name`         | yes      | place entered or left           |
//! | `coordinates_latitude`  | no       | carried through, unused         |
//! | `coordinates_longitude` | no       | carried through, unused         |
//! | `timestamp`             | yes      | ISO 8601 instant                |
//! | `event_type`            | yes      | `ENTER` or `LEAVE`              |
//!
//! Rows are yielded in file order and are not interpreted here; timestamp and
//! subject validation happen in [`cg_core::EventRecord::normalize`].

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use cg_core::RawEventRow;
use thiserror::Error;

/// Record source errors.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be opened or read.
    #[error("unable to read event source {origin}")]
    Unavailable {
        origin: String,
        #[source]
        source: io::Error,
    },
    /// The source is not well-formed delimited text with the expected columns.
    #[error("unable to parse event source {origin}")]
    Malformed {
        origin: String,
        #[source]
        source: csv::Error,
    },
}

impl SourceError {
    fn from_csv(err: csv::Error, origin: &str) -> Self {
        if err.is_io_error() {
            Self::Unavailable {
                origin: origin.to_string(),
                source: io::Error::from(err),
            }
        } else {
            Self::Malformed {
                origin: origin.to_string(),
                source: err,
            }
        }
    }
}

/// A finite sequence of raw presence-log rows.
pub trait RecordSource {
    /// Yields rows in input order, stopping at the first error the caller sees.
    fn rows(&mut self) -> impl Iterator<Item = Result<RawEventRow, SourceError>> + '_;
}

/// CSV-backed record source.
pub struct CsvSource<R> {
    reader: csv::Reader<R>,
    origin: String,
}

impl CsvSource<File> {
    /// Opens a CSV file.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|source| SourceError::Unavailable {
            origin: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened event source");
        Ok(Self::from_reader(file, path.display().to_string()))
    }
}

impl<R: Read> CsvSource<R> {
    /// Wraps any reader, e.g. stdin or an in-memory buffer.
    ///
    /// `origin` names the source in error messages.
    pub fn from_reader(reader: R, origin: impl Into<String>) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(reader);
        Self {
            reader,
            origin: origin.into(),
        }
    }
}

impl<R: Read> RecordSource for CsvSource<R> {
    fn rows(&mut self) -> impl Iterator<Item = Result<RawEventRow, SourceError>> + '_ {
        let origin = &self.origin;
        self.reader
            .deserialize::<RawEventRow>()
            .map(move |row| row.map_err(|err| SourceError::from_csv(err, origin)))
    }
}
