//! Subject and window selection.

use chrono::{DateTime, Utc};

use crate::event::EventRecord;
use crate::types::SubjectId;

/// A half-open query interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl QueryWindow {
    /// Creates a window. An `end` at or before `start` yields an empty window.
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `t` falls in `[start, end)`.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }

    /// True when no instant can fall inside the window.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Picks one subject's events inside a query window, in chronological order.
#[derive(Debug, Clone)]
pub struct Selector {
    subject: SubjectId,
    window: QueryWindow,
}

impl Selector {
    pub const fn new(subject: SubjectId, window: QueryWindow) -> Self {
        Self { subject, window }
    }

    pub const fn subject(&self) -> &SubjectId {
        &self.subject
    }

    pub const fn window(&self) -> &QueryWindow {
        &self.window
    }

    /// Per-event predicate, usable while rows are still arriving.
    pub fn matches(&self, event: &EventRecord) -> bool {
        event.subject_id == self.subject && self.window.contains(event.timestamp)
    }

    /// Keeps matching events and sorts them by timestamp.
    ///
    /// The sort is stable: events sharing a timestamp keep their input order.
    pub fn select<I>(&self, events: I) -> Vec<EventRecord>
    where
        I: IntoIterator<Item = EventRecord>,
    {
        let mut selected: Vec<EventRecord> =
            events.into_iter().filter(|e| self.matches(e)).collect();
        sort_chronologically(&mut selected);
        selected
    }
}

/// Stable sort by timestamp, for events already filtered with
/// [`Selector::matches`].
pub fn sort_chronologically(events: &mut [EventRecord]) {
    events.sort_by_key(|e| e.timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Coordinates;
    use crate::event_type::EventKind;
    use crate::location::Location;
    use chrono::{Duration, TimeZone};

    fn ts(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0)
            .single()
            .expect("valid test timestamp")
            + Duration::minutes(minutes)
    }

    fn event(subject: &str, location: &str, minutes: i64) -> EventRecord {
        EventRecord {
            subject_id: SubjectId::new(subject),
            location: Location::Named(location.to_string()),
            kind: EventKind::Enter,
            timestamp: ts(minutes),
            coordinates: Coordinates::default(),
        }
    }

    fn selector(start: i64, end: i64) -> Selector {
        Selector::new(
            SubjectId::new("u1"),
            QueryWindow::new(ts(start), ts(end)),
        )
    }

    #[test]
    fn window_is_half_open() {
        let window = QueryWindow::new(ts(0), ts(60));
        assert!(window.contains(ts(0)));
        assert!(window.contains(ts(59)));
        assert!(!window.contains(ts(60)));
        assert!(!window.contains(ts(-1)));
    }

    #[test]
    fn inverted_window_is_empty() {
        assert!(QueryWindow::new(ts(10), ts(10)).is_empty());
        assert!(QueryWindow::new(ts(10), ts(0)).is_empty());
        assert!(!QueryWindow::new(ts(0), ts(10)).is_empty());
    }

    #[test]
    fn filters_other_subjects() {
        let events = vec![event("u1", "A", 5), event("u2", "B", 6), event("u1", "C", 7)];

        let selected = selector(0, 60).select(events);

        let names: Vec<_> = selected.iter().map(|e| e.location.to_string()).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn filters_outside_window() {
        let events = vec![
            event("u1", "before", -1),
            event("u1", "start", 0),
            event("u1", "inside", 30),
            event("u1", "end", 60),
        ];

        let selected = selector(0, 60).select(events);

        let names: Vec<_> = selected.iter().map(|e| e.location.to_string()).collect();
        assert_eq!(names, ["start", "inside"]);
    }

    #[test]
    fn sorts_chronologically() {
        let events = vec![event("u1", "late", 40), event("u1", "early", 10), event("u1", "mid", 20)];

        let selected = selector(0, 60).select(events);

        let names: Vec<_> = selected.iter().map(|e| e.location.to_string()).collect();
        assert_eq!(names, ["early", "mid", "late"]);
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let events = vec![
            event("u1", "second", 20),
            event("u1", "tie-a", 10),
            event("u1", "tie-b", 10),
            event("u1", "tie-c", 10),
        ];

        let selected = selector(0, 60).select(events);

        let names: Vec<_> = selected.iter().map(|e| e.location.to_string()).collect();
        assert_eq!(names, ["tie-a", "tie-b", "tie-c", "second"]);
    }

    #[test]
    fn sort_chronologically_is_stable() {
        let mut events = vec![
            event("u1", "late", 30),
            event("u1", "tie-a", 10),
            event("u1", "tie-b", 10),
        ];

        sort_chronologically(&mut events);

        let names: Vec<_> = events.iter().map(|e| e.location.to_string()).collect();
        assert_eq!(names, ["tie-a", "tie-b", "late"]);
    }

    #[test]
    fn empty_subject_only_matches_empty_subject() {
        let events = vec![event("", "blank", 5), event("u1", "A", 6)];

        let selected = Selector::new(SubjectId::new(""), QueryWindow::new(ts(0), ts(60)))
            .select(events);

        let names: Vec<_> = selected.iter().map(|e| e.location.to_string()).collect();
        assert_eq!(names, ["blank"]);
    }

    #[test]
    fn empty_window_selects_nothing() {
        let events = vec![event("u1", "A", 5)];
        assert!(selector(10, 0).select(events).is_empty());
    }
}
