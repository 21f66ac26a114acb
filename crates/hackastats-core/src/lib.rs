//! Core types, errors, and utilities for hackastats
//!
//! This crate provides the span and aggregate data model, error handling,
//! timezone configuration, and duration formatting helpers shared by the
//! aggregation engine and the command-line front end.

pub mod error;
pub mod format;
pub mod timezone;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{HackastatsError, Result};
pub use types::{
    DailyTotal, HourSegment, HourlyTotal, MonthKey, MonthSeries, SeriesPoint, Span, SpansResponse,
    Totals,
};
