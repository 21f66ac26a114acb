//! CLI interface for hackastats
//!
//! This module defines the command-line interface using clap. Every report
//! reads a span document (the body of the heartbeat spans endpoint) from
//! `--input` or stdin.
//!
//! # Example
//!
//! ```bash
//! # Calendar heatmap for a saved span document, pinned to a reference day
//! hackastats heatmap --input spans.json --now 2025-06-15 --json
//!
//! # Hourly profile in Tokyo time
//! cat spans.json | hackastats hours --timezone Asia/Tokyo
//!
//! # Split one span across hour boundaries
//! hackastats split --start 1740826770 --end 1740826830 --duration 60 --utc
//! ```

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};
use hackastats_core::error::{HackastatsError, Result};
use hackastats_core::timezone::TimezoneConfig;
use std::path::PathBuf;

/// Turn coding-activity spans into calendar heatmaps and hourly breakdowns
#[derive(Parser, Debug, Clone)]
#[command(name = "hackastats")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default shows only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Span document to read; `-` or no value reads stdin
    #[arg(long, short = 'i', global = true, env = "HACKASTATS_INPUT")]
    pub input: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Timezone for "today" and local hours (e.g. "America/New_York", "UTC")
    /// If not specified, uses the system's local timezone
    #[arg(long, short = 'z', global = true, env = "HACKASTATS_TZ")]
    pub timezone: Option<String>,

    /// Use UTC (overrides --timezone)
    #[arg(long, global = true)]
    pub utc: bool,

    /// Reference instant for month truncation (RFC 3339, or YYYY-MM-DD for
    /// local midnight); defaults to the current time
    #[arg(long, global = true)]
    pub now: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available reports
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show total activity per UTC date
    Daily,

    /// Show dense per-day series for each month, most recent first
    Heatmap,

    /// Show total activity per local hour of the day
    Hours,

    /// Split a single span across local hour boundaries
    Split {
        /// Span start in epoch seconds
        #[arg(long)]
        start: i64,

        /// Span end in epoch seconds
        #[arg(long)]
        end: i64,

        /// Recorded duration in seconds
        #[arg(long)]
        duration: Option<f64>,
    },
}

impl Command {
    /// Whether this command consumes a span document
    pub fn reads_spans(&self) -> bool {
        !matches!(self, Command::Split { .. })
    }
}

/// Parse the `--now` reference instant
///
/// RFC 3339 values are taken as-is. A bare `YYYY-MM-DD` means midnight of
/// that date in the configured timezone.
///
/// # Examples
///
/// ```
/// use hackastats::cli::parse_reference_time;
/// use hackastats_core::timezone::TimezoneConfig;
///
/// let now = parse_reference_time("2025-06-15", &TimezoneConfig::utc()).unwrap();
/// assert_eq!(now.to_rfc3339(), "2025-06-15T00:00:00+00:00");
///
/// let now = parse_reference_time("2025-06-15T12:30:00+02:00", &TimezoneConfig::utc()).unwrap();
/// assert_eq!(now.to_rfc3339(), "2025-06-15T10:30:00+00:00");
///
/// assert!(parse_reference_time("June 15th", &TimezoneConfig::utc()).is_err());
/// ```
pub fn parse_reference_time(value: &str, timezone: &TimezoneConfig) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        HackastatsError::InvalidArgument(format!(
            "invalid --now value '{value}'. Use RFC 3339 or YYYY-MM-DD"
        ))
    })?;

    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| HackastatsError::InvalidArgument(format!("invalid date '{value}'")))?;

    match timezone.tz.from_local_datetime(&midnight).earliest() {
        Some(local) => Ok(local.with_timezone(&Utc)),
        // Midnight skipped by a DST jump; fall back to UTC midnight
        None => Ok(Utc.from_utc_datetime(&midnight)),
    }
}
