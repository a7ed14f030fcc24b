//! Core domain logic for caregiving time reports.
//!
//! This crate contains the fundamental types and logic for:
//! - Normalization: turning raw presence-log rows into typed events
//! - Selection: one subject's events inside a half-open window, in order
//! - Accumulation: folding those events into caregiving and travel minutes

mod accumulator;
pub mod event;
pub mod event_type;
pub mod location;
mod select;
pub mod time;
pub mod types;

pub use accumulator::{
    AccumulatorConfig, AccumulatorState, CaregivingTotals, InconsistentChain, RelevanceWindowError,
    TracingWarningSink, WarningSink, accumulate,
};
pub use event::{EventRecord, NormalizeError, RawEventRow};
pub use event_type::EventKind;
pub use location::{DEFAULT_HOME_LABEL, Location};
pub use select::{QueryWindow, Selector, sort_chronologically};
pub use time::{TimestampError, elapsed_minutes, parse_instant};
pub use types::SubjectId;
