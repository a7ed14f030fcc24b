//! Caregiving time accumulation.
//!
//! Folds one subject's chronologically ordered location transitions into two
//! totals: caregiving minutes and traveling minutes. Travel is part of
//! caregiving, so every travelled minute is counted in both.
//!
//! # Transition Rules
//!
//! First event:
//! - `LEAVE` away from home: the subject was there since the window opened,
//!   so caregiving starts at `minutes(query_start, t)`.
//! - anything else: both totals start at zero.
//!
//! Each later event is compared with the one before it:
//! - `ENTER -> LEAVE` away from home: the visit is caregiving time.
//! - `ENTER -> LEAVE` at home: nothing.
//! - `LEAVE -> ENTER`: travel, credited to both totals only when the next
//!   `ENTER` arrives within the relevance window (inclusive).
//! - any other pair: inconsistent chain, reported to the [`WarningSink`].
//!
//! Time after the last event is never counted.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::event::EventRecord;
use crate::event_type::EventKind;
use crate::location::Location;
use crate::time::elapsed_minutes;

/// Configuration for caregiving accumulation.
#[derive(Debug, Clone)]
pub struct AccumulatorConfig {
    /// Longest `LEAVE -> ENTER` gap still credited as travel.
    /// Default: 2 hours.
    pub travel_relevance_window: Duration,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            travel_relevance_window: Duration::hours(2),
        }
    }
}

impl AccumulatorConfig {
    /// Builds a config whose travel relevance window is `minutes` long.
    ///
    /// Fails for negative counts and for counts too large to be a [`Duration`].
    pub fn from_travel_relevance_minutes(minutes: i64) -> Result<Self, RelevanceWindowError> {
        let travel_relevance_window = Duration::try_minutes(minutes)
            .filter(|window| *window >= Duration::zero())
            .ok_or(RelevanceWindowError { minutes })?;

        Ok(Self {
            travel_relevance_window,
        })
    }
}

/// A travel relevance window that cannot be represented.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("travel relevance window of {minutes} minutes is negative or too large")]
pub struct RelevanceWindowError {
    minutes: i64,
}

/// Final or running caregiving totals, in whole minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaregivingTotals {
    pub caregiving_minutes: i64,
    pub traveling_minutes: i64,
}

impl CaregivingTotals {
    const fn add_session(self, minutes: i64) -> Self {
        Self {
            caregiving_minutes: self.caregiving_minutes + minutes,
            traveling_minutes: self.traveling_minutes,
        }
    }

    const fn add_travel(self, minutes: i64) -> Self {
        Self {
            caregiving_minutes: self.caregiving_minutes + minutes,
            traveling_minutes: self.traveling_minutes + minutes,
        }
    }
}

/// Two consecutive events that do not alternate `ENTER`/`LEAVE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InconsistentChain {
    pub previous: EventKind,
    pub current: EventKind,
    pub at: DateTime<Utc>,
}

/// Receives non-fatal data warnings raised during accumulation.
pub trait WarningSink {
    fn inconsistent_chain(&mut self, warning: &InconsistentChain);
}

/// Sink that logs warnings through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingWarningSink;

impl WarningSink for TracingWarningSink {
    fn inconsistent_chain(&mut self, warning: &InconsistentChain) {
        tracing::warn!(
            previous = %warning.previous,
            current = %warning.current,
            at = %warning.at,
            "Inconsistent data. Encountered {}/{} event chain.",
            warning.previous,
            warning.current,
        );
    }
}

impl WarningSink for Vec<InconsistentChain> {
    fn inconsistent_chain(&mut self, warning: &InconsistentChain) {
        self.push(warning.clone());
    }
}

/// Snapshot of the most recently folded event.
#[derive(Debug, Clone)]
struct LastEvent {
    kind: EventKind,
    location: Location,
    timestamp: DateTime<Utc>,
}

impl From<&EventRecord> for LastEvent {
    fn from(event: &EventRecord) -> Self {
        Self {
            kind: event.kind.clone(),
            location: event.location.clone(),
            timestamp: event.timestamp,
        }
    }
}

/// State threaded through the fold, one value per report.
#[derive(Debug, Clone)]
pub struct AccumulatorState {
    last: Option<LastEvent>,
    totals: CaregivingTotals,
    query_start: DateTime<Utc>,
}

impl AccumulatorState {
    /// Fresh state with zero totals for a window opening at `query_start`.
    pub const fn new(query_start: DateTime<Utc>) -> Self {
        Self {
            last: None,
            totals: CaregivingTotals {
                caregiving_minutes: 0,
                traveling_minutes: 0,
            },
            query_start,
        }
    }

    pub const fn totals(&self) -> CaregivingTotals {
        self.totals
    }

    /// Folds one event, returning the next state.
    ///
    /// The previous-event snapshot always moves to `event`, including when the
    /// pair was inconsistent.
    pub fn step<S: WarningSink>(
        self,
        event: &EventRecord,
        config: &AccumulatorConfig,
        sink: &mut S,
    ) -> Self {
        let totals = match &self.last {
            None => seed_totals(event, self.query_start),
            Some(last) => apply_transition(self.totals, last, event, config, sink),
        };

        Self {
            last: Some(LastEvent::from(event)),
            totals,
            query_start: self.query_start,
        }
    }
}

/// Totals after the first event of the window.
fn seed_totals(event: &EventRecord, query_start: DateTime<Utc>) -> CaregivingTotals {
    let caregiving_minutes = match (&event.kind, &event.location) {
        (EventKind::Leave, Location::Named(_)) => elapsed_minutes(query_start, event.timestamp),
        _ => 0,
    };

    CaregivingTotals {
        caregiving_minutes,
        traveling_minutes: 0,
    }
}

fn apply_transition<S: WarningSink>(
    totals: CaregivingTotals,
    last: &LastEvent,
    event: &EventRecord,
    config: &AccumulatorConfig,
    sink: &mut S,
) -> CaregivingTotals {
    match (&last.kind, &event.kind) {
        (EventKind::Enter, EventKind::Leave) => match last.location {
            Location::Home => totals,
            Location::Named(_) => {
                totals.add_session(elapsed_minutes(last.timestamp, event.timestamp))
            }
        },
        (EventKind::Leave, EventKind::Enter) => {
            // A limit beyond the calendar range admits every gap
            let within_window = last
                .timestamp
                .checked_add_signed(config.travel_relevance_window)
                .is_none_or(|limit| event.timestamp <= limit);
            if within_window {
                totals.add_travel(elapsed_minutes(last.timestamp, event.timestamp))
            } else {
                tracing::debug!(
                    left_at = %last.timestamp,
                    entered_at = %event.timestamp,
                    "travel gap exceeds relevance window, not credited"
                );
                totals
            }
        }
        (previous, current) => {
            sink.inconsistent_chain(&InconsistentChain {
                previous: previous.clone(),
                current: current.clone(),
                at: event.timestamp,
            });
            totals
        }
    }
}

/// Folds an ordered, filtered event sequence into caregiving totals.
///
/// Events must belong to one subject, fall inside the query window and be
/// sorted by timestamp ascending (see [`crate::Selector::select`]).
pub fn accumulate<S: WarningSink>(
    events: &[EventRecord],
    query_start: DateTime<Utc>,
    config: &AccumulatorConfig,
    sink: &mut S,
) -> CaregivingTotals {
    events
        .iter()
        .fold(AccumulatorState::new(query_start), |state, event| {
            state.step(event, config, sink)
        })
        .totals()
}
