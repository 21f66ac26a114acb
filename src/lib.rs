//! hackastats - Calendar heatmaps and hourly breakdowns from coding-activity spans
//!
//! This library provides functionality to:
//! - Load activity spans saved from the heartbeat spans endpoint
//! - Sum span durations per UTC calendar date
//! - Build dense, most-recent-first month series for a calendar heatmap
//! - Split spans across local hour boundaries for an hourly profile
//! - Render the results as tables or chart-ready JSON
//!
//! # Examples
//!
//! ```no_run
//! use hackastats::{aggregation::Aggregator, span_loader::SpanLoader};
//! use hackastats_core::timezone::TimezoneConfig;
//!
//! #[tokio::main]
//! async fn main() -> hackastats::Result<()> {
//!     let spans = SpanLoader::from_path("spans.json").load().await?;
//!
//!     let aggregator = Aggregator::new(TimezoneConfig::default());
//!     let daily = Aggregator::aggregate_daily(&spans);
//!     let series = aggregator.build_month_series(&daily, chrono::Utc::now());
//!     let hourly = aggregator.aggregate_hourly(&spans);
//!
//!     println!("{} months, {} hours", series.len(), hourly.len());
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cli;
pub mod hour_split;
pub mod output;
pub mod span_loader;

// Re-export commonly used types
pub use hackastats_core::error::{HackastatsError, Result};
pub use hackastats_core::timezone::TimezoneConfig;
pub use hackastats_core::types::{
    DailyTotal, HourSegment, HourlyTotal, MonthKey, MonthSeries, SeriesPoint, Span, Totals,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
