//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Caregiving time report.
///
/// Summarizes how long one subject spent on caregiving duties, and how much of
/// that was travel, from a CSV log of ENTER/LEAVE location events.
#[derive(Debug, Parser)]
#[command(name = "caretime", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the report as JSON instead of a sentence.
    #[arg(long)]
    pub json: bool,

    /// CSV event log to read.
    pub events_file: PathBuf,

    /// Subject whose time is reported.
    pub subject_id: String,

    /// Window start, inclusive (e.g., 2024-01-01T08:00:00Z).
    pub start: String,

    /// Window end, exclusive (e.g., 2024-01-01T20:00:00Z).
    pub end: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_four_positionals() {
        let cli = Cli::try_parse_from([
            "caretime",
            "events.csv",
            "u1",
            "2024-01-01T08:00:00Z",
            "2024-01-01T20:00:00Z",
        ])
        .unwrap();

        assert_eq!(cli.events_file, PathBuf::from("events.csv"));
        assert_eq!(cli.subject_id, "u1");
        assert_eq!(cli.start, "2024-01-01T08:00:00Z");
        assert_eq!(cli.end, "2024-01-01T20:00:00Z");
        assert!(!cli.json);
    }

    #[test]
    fn rejects_too_few_positionals() {
        let result = Cli::try_parse_from(["caretime", "events.csv", "u1", "2024-01-01T08:00:00Z"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_too_many_positionals() {
        let result = Cli::try_parse_from([
            "caretime",
            "events.csv",
            "u1",
            "2024-01-01T08:00:00Z",
            "2024-01-01T20:00:00Z",
            "extra",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn flags_do_not_count_as_positionals() {
        let cli = Cli::try_parse_from([
            "caretime",
            "--json",
            "-v",
            "events.csv",
            "u1",
            "2024-01-01T08:00:00Z",
            "2024-01-01T20:00:00Z",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(cli.verbose);
    }
}
