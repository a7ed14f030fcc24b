//! Report command for caregiving time summaries.
//!
//! Reads the event log, selects one subject's events inside the query window,
//! folds them into caregiving and travel minutes and renders the result as a
//! sentence (or JSON with `--json`).

use std::path::Path;

use anyhow::{Context, Result};
use cg_core::{
    CaregivingTotals, EventRecord, QueryWindow, Selector, SubjectId, TracingWarningSink,
    accumulate, parse_instant, sort_chronologically,
};
use cg_source::{CsvSource, RecordSource};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::config::Config;

/// Computed report data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportData {
    pub subject_id: String,
    #[serde(serialize_with = "serialize_instant")]
    pub window_start: DateTime<Utc>,
    #[serde(serialize_with = "serialize_instant")]
    pub window_end: DateTime<Utc>,
    pub caregiving_minutes: i64,
    pub traveling_minutes: i64,
}

// ========== Argument Parsing ==========

/// Parses the window bounds given on the command line.
pub fn parse_window(start: &str, end: &str) -> Result<QueryWindow> {
    let start = parse_instant(start).context("invalid start or end time")?;
    let end = parse_instant(end).context("invalid start or end time")?;

    let window = QueryWindow::new(start, end);
    if window.is_empty() {
        tracing::warn!(%start, %end, "query window is empty, no events can be selected");
    }
    Ok(window)
}

// ========== Report Generation ==========

/// Generates report data from a record source.
///
/// Rows are normalized and filtered as they are read; the fold starts once
/// the whole selection is sorted. A single malformed row aborts the report.
pub fn generate_report_data<S: RecordSource>(
    source: &mut S,
    selector: &Selector,
    config: &Config,
) -> Result<ReportData> {
    let accumulator_config = config
        .accumulator_config()
        .context("invalid configuration")?;

    let mut matching = Vec::new();
    let mut rows_read = 0_usize;

    for (index, row) in source.rows().enumerate() {
        let row = row?;
        let event = EventRecord::normalize(row, &config.home_location)
            .with_context(|| format!("invalid event record {}", index + 1))?;
        rows_read += 1;
        if selector.matches(&event) {
            matching.push(event);
        }
    }

    sort_chronologically(&mut matching);
    tracing::debug!(rows_read, selected = matching.len(), "selected events");

    let window = selector.window();
    let CaregivingTotals {
        caregiving_minutes,
        traveling_minutes,
    } = accumulate(
        &matching,
        window.start(),
        &accumulator_config,
        &mut TracingWarningSink,
    );

    Ok(ReportData {
        subject_id: selector.subject().to_string(),
        window_start: window.start(),
        window_end: window.end(),
        caregiving_minutes,
        traveling_minutes,
    })
}

// ========== Duration Formatting ==========

/// Formats a count with its unit, e.g. "1 hour" or "5 minutes".
///
/// Zero counts are omitted entirely; anything but exactly 1 is plural.
fn format_unit(count: i64, unit: &str) -> Option<String> {
    match count {
        0 => None,
        1 => Some(format!("1 {unit}")),
        _ => Some(format!("{count} {unit}s")),
    }
}

/// Formats minutes as "X hours and Y minutes", dropping zero parts.
/// Returns an empty string for 0.
pub fn format_duration(total_minutes: i64) -> String {
    let hours = total_minutes.div_euclid(60);
    let minutes = total_minutes.rem_euclid(60);

    match (format_unit(hours, "hour"), format_unit(minutes, "minute")) {
        (Some(hours), Some(minutes)) => format!("{hours} and {minutes}"),
        (Some(part), None) | (None, Some(part)) => part,
        (None, None) => String::new(),
    }
}

/// Renders an instant as ISO 8601 UTC with millisecond precision.
fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serializes an instant in the same form the sentence uses.
fn serialize_instant<S: Serializer>(
    instant: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_instant(*instant))
}

/// Formats the human-readable report sentence.
pub fn format_report(data: &ReportData) -> String {
    let start = format_instant(data.window_start);
    let end = format_instant(data.window_end);

    if data.caregiving_minutes == 0 {
        return format!(
            "The subject with id \"{}\" did not spend time performing caregiving between {start} and {end}.",
            data.subject_id
        );
    }

    let travel = if data.traveling_minutes > 0 {
        format!(
            ", of which {} was spent travelling",
            format_duration(data.traveling_minutes)
        )
    } else {
        String::new()
    };

    format!(
        "The subject with id \"{}\" spent {} performing caregiving duties between {start} and {end}{travel}.",
        data.subject_id,
        format_duration(data.caregiving_minutes)
    )
}

/// Runs the report command, printing one line to stdout.
pub fn run(
    events_file: &Path,
    subject_id: &str,
    start: &str,
    end: &str,
    config: &Config,
    json: bool,
) -> Result<()> {
    let window = parse_window(start, end)?;
    let subject = SubjectId::new(subject_id);
    tracing::debug!(%subject, start = %window.start(), end = %window.end(), "query window");

    let mut source = CsvSource::open(events_file)?;
    let data = generate_report_data(&mut source, &Selector::new(subject, window), config)?;

    if json {
        println!("{}", serde_json::to_string(&data)?);
    } else {
        println!("{}", format_report(&data));
    }

    Ok(())
}
