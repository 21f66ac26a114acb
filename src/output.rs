//! Output formatting module for hackastats
//!
//! This module provides formatters for displaying aggregates in different formats:
//! - Table format for human-readable terminal output, including a glyph heatmap
//! - JSON format shaped for charting components (`{name, data: [{x, y}]}`)
//!
//! # Examples
//!
//! ```
//! use hackastats::output::get_formatter;
//! use hackastats_core::types::{DailyTotal, Totals};
//! use chrono::NaiveDate;
//!
//! let daily = vec![DailyTotal::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), 3600.0)];
//! let totals = Totals::from_daily(&daily);
//!
//! let formatter = get_formatter(false, false);
//! assert!(formatter.format_daily(&daily, &totals).contains("2025-03-01"));
//!
//! let json_formatter = get_formatter(true, false);
//! let json: serde_json::Value =
//!     serde_json::from_str(&json_formatter.format_daily(&daily, &totals)).unwrap();
//! assert_eq!(json[0]["date"], "2025-03-01");
//! ```

use colored::Colorize;
use hackastats_core::format::human_time;
use hackastats_core::types::{DailyTotal, HourSegment, HourlyTotal, MonthSeries, Totals};
use prettytable::{Cell, Row, Table, format, row};
use serde_json::{Value, json};

/// Glyphs for increasing activity; index 0 is an empty day
const INTENSITY_GLYPHS: [&str; 5] = ["·", "░", "▒", "▓", "█"];

/// Widest bar drawn in the hourly profile
const HOURLY_BAR_WIDTH: usize = 30;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format per-date totals
    fn format_daily(&self, data: &[DailyTotal], totals: &Totals) -> String;

    /// Format month series, most recent month first
    fn format_heatmap(&self, series: &[MonthSeries]) -> String;

    /// Format a 24-hour activity profile
    fn format_hourly(&self, profile: &[HourlyTotal]) -> String;

    /// Format the hour segments of a single span
    fn format_segments(&self, segments: &[HourSegment]) -> String;
}

/// Table formatter for human-readable output
pub struct TableFormatter {
    /// Whether to colour heatmap glyphs
    pub colored_output: bool,
}

impl TableFormatter {
    pub fn new(colored_output: bool) -> Self {
        Self { colored_output }
    }

    /// Map a value to a 0..=4 intensity bucket relative to `max`
    fn intensity(value: f64, max: f64) -> usize {
        if value <= 0.0 || max <= 0.0 {
            return 0;
        }
        let ratio = (value / max).min(1.0);
        ((ratio * 4.0).ceil() as usize).clamp(1, 4)
    }

    fn glyph(&self, level: usize) -> String {
        let glyph = INTENSITY_GLYPHS[level.min(INTENSITY_GLYPHS.len() - 1)];
        if !self.colored_output {
            return glyph.to_string();
        }
        match level {
            0 => glyph.dimmed().to_string(),
            1 | 2 => glyph.green().to_string(),
            _ => glyph.bright_green().to_string(),
        }
    }

    fn heatmap_strip(&self, series: &MonthSeries, max: f64) -> String {
        series
            .data
            .iter()
            .map(|point| self.glyph(Self::intensity(point.y, max)))
            .collect()
    }

    fn bar(value: f64, max: f64) -> String {
        if value <= 0.0 || max <= 0.0 {
            return String::new();
        }
        let width = ((value / max) * HOURLY_BAR_WIDTH as f64).round() as usize;
        "█".repeat(width.max(1))
    }

    /// Create a totals row for tables
    fn format_totals_row(totals: &Totals, columns: usize) -> Row {
        let mut cells = vec![
            Cell::new("TOTAL").style_spec("b"),
            Cell::new(&human_time(totals.total_seconds)).style_spec("br"),
            Cell::new(&format!("{} active days", totals.active_days)).style_spec("r"),
        ];
        cells.resize_with(columns, || Cell::new(""));
        Row::new(cells)
    }
}

impl OutputFormatter for TableFormatter {
    fn format_daily(&self, data: &[DailyTotal], totals: &Totals) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Date", b -> "Time", b -> "Seconds"]);

        for day in data {
            table.add_row(row![
                day.date,
                r -> human_time(day.value),
                r -> format!("{:.0}", day.value)
            ]);
        }

        table.add_row(Row::new(vec![Cell::new(""); 3]));
        table.add_row(Self::format_totals_row(totals, 3));

        table.to_string()
    }

    fn format_heatmap(&self, series: &[MonthSeries]) -> String {
        let max = series
            .iter()
            .flat_map(|s| s.data.iter().map(|p| p.y))
            .fold(0.0f64, f64::max);

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![
            b -> "Month",
            b -> "Days",
            b -> "Active",
            b -> "Total",
            b -> "Busiest"
        ]);

        for month in series {
            let busiest = month
                .busiest_day()
                .map(|p| format!("{} ({})", p.x, human_time(p.y)))
                .unwrap_or_else(|| "-".to_string());
            table.add_row(row![
                month.name,
                self.heatmap_strip(month, max),
                r -> month.active_days(),
                r -> human_time(month.total()),
                busiest
            ]);
        }

        let totals = Totals::from_series(series);
        table.add_row(Row::new(vec![Cell::new(""); 5]));
        table.add_row(row![
            b -> "TOTAL",
            "",
            r -> totals.active_days,
            br -> human_time(totals.total_seconds),
            ""
        ]);

        table.to_string()
    }

    fn format_hourly(&self, profile: &[HourlyTotal]) -> String {
        let max = profile.iter().map(|h| h.value).fold(0.0f64, f64::max);

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Hour", b -> "Time", b -> ""]);

        for hour in profile {
            table.add_row(row![
                format!("{:02}:00", hour.hour),
                r -> human_time(hour.value),
                Self::bar(hour.value, max)
            ]);
        }

        table.to_string()
    }

    fn format_segments(&self, segments: &[HourSegment]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Hour", b -> "Seconds"]);

        for segment in segments {
            table.add_row(row![
                format!("{:02}:00", segment.hour),
                r -> format!("{:.0}", segment.duration)
            ]);
        }

        table.to_string()
    }
}

/// JSON formatter for machine-readable output
///
/// Aggregates are emitted in the exact shapes a charting component consumes.
pub struct JsonFormatter;

impl JsonFormatter {
    fn to_pretty(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    /// Bare `[{date, value}]` array; totals are a table-only footer
    fn format_daily(&self, data: &[DailyTotal], _totals: &Totals) -> String {
        Self::to_pretty(&json!(data))
    }

    /// Bare `[{name, data: [{x, y}]}]` array, ready for a heatmap chart
    fn format_heatmap(&self, series: &[MonthSeries]) -> String {
        Self::to_pretty(&json!(series))
    }

    fn format_hourly(&self, profile: &[HourlyTotal]) -> String {
        Self::to_pretty(&json!({ "hourly": profile }))
    }

    fn format_segments(&self, segments: &[HourSegment]) -> String {
        Self::to_pretty(&json!({ "segments": segments }))
    }
}

/// Get the appropriate formatter based on output preference
pub fn get_formatter(json: bool, colored_output: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new(colored_output))
    }
}
