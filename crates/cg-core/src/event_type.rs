//! Event kind enum as the single source of truth for event type tags.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Direction of a location transition.
///
/// Tags other than `ENTER` and `LEAVE` are kept as [`EventKind::Other`] so the
/// accumulator can flag them instead of the normalizer rejecting the row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Enter,
    Leave,
    Other(String),
}

impl EventKind {
    /// The tag as it appears in the event log.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Enter => "ENTER",
            Self::Leave => "LEAVE",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        match s {
            "ENTER" => Self::Enter,
            "LEAVE" => Self::Leave,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for EventKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}
