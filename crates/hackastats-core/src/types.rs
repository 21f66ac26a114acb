//! Core domain types for hackastats
//!
//! Spans come in from the activity-tracking API; everything else in this
//! module is an aggregate shaped for direct serialization to a charting
//! component (`{date, value}` for daily totals, `{name, data: [{x, y}]}` for
//! month series).

use crate::error::{HackastatsError, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A contiguous interval of recorded coding activity
///
/// `duration` is tracked independently of the two instants and is the
/// authoritative value for totals; it may differ from `end_time - start_time`.
///
/// # Examples
/// ```
/// use hackastats_core::types::Span;
///
/// let span: Span = serde_json::from_str(
///     r#"{"start_time": 1740870000, "end_time": 1740873600, "duration": 3500}"#,
/// ).unwrap();
/// assert_eq!(span.duration_secs(), 3500.0);
/// assert_eq!(span.wall_clock_secs(), 3600);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Start instant in seconds since the Unix epoch
    #[serde(deserialize_with = "deserialize_epoch_secs")]
    pub start_time: i64,
    /// End instant in seconds since the Unix epoch
    #[serde(deserialize_with = "deserialize_epoch_secs")]
    pub end_time: i64,
    /// Recorded activity in seconds; absent or `null` reads as zero
    #[serde(default)]
    pub duration: Option<f64>,
}

impl Span {
    pub fn new(start_time: i64, end_time: i64, duration: f64) -> Self {
        Self {
            start_time,
            end_time,
            duration: Some(duration),
        }
    }

    /// Recorded duration, with a missing value treated as zero
    pub fn duration_secs(&self) -> f64 {
        self.duration.unwrap_or(0.0)
    }

    /// Seconds between the start and end instants
    pub fn wall_clock_secs(&self) -> i64 {
        self.end_time.saturating_sub(self.start_time)
    }

    /// Start instant as a UTC datetime
    pub fn start_utc(&self) -> Result<DateTime<Utc>> {
        DateTime::from_timestamp(self.start_time, 0)
            .ok_or(HackastatsError::InvalidTimestamp(self.start_time))
    }
}

/// Upstream encodes epoch seconds as either integers or floats.
fn deserialize_epoch_secs<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum EpochSecs {
        Int(i64),
        Float(f64),
    }

    match EpochSecs::deserialize(deserializer)? {
        EpochSecs::Int(secs) => Ok(secs),
        EpochSecs::Float(secs) if secs.is_finite() => Ok(secs.floor() as i64),
        EpochSecs::Float(secs) => Err(serde::de::Error::custom(format!(
            "epoch seconds must be finite, got {secs}"
        ))),
    }
}

/// Envelope returned by the heartbeat spans endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpansResponse {
    #[serde(default)]
    pub spans: Vec<Span>,
}

/// Total recorded seconds on one UTC calendar date
///
/// The date stays a string because totals may arrive from outside the
/// aggregator; [`DailyTotal::parse_date`] validates it.
///
/// # Examples
/// ```
/// use hackastats_core::types::DailyTotal;
/// use chrono::NaiveDate;
///
/// let total = DailyTotal::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), 3600.0);
/// assert_eq!(total.date, "2025-03-01");
/// assert_eq!(total.parse_date().unwrap(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// Calendar date in `YYYY-MM-DD` form
    pub date: String,
    /// Seconds of activity on that date
    pub value: f64,
}

impl DailyTotal {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            value,
        }
    }

    /// Parse the `date` field
    ///
    /// Only the zero-padded `YYYY-MM-DD` form is accepted; `2025-4-2` is
    /// rejected even though it names a real day.
    pub fn parse_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .ok()
            .filter(|date| date.format("%Y-%m-%d").to_string() == self.date)
            .ok_or_else(|| HackastatsError::MalformedDate(self.date.clone()))
    }
}

/// A calendar month, ordered chronologically by (year, month)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based month number
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// First day of the month, if the month is representable
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Number of days in the month, leap years included
    pub fn days_in_month(&self) -> Option<u32> {
        let first = self.first_day()?;
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        }?;
        u32::try_from(next.signed_duration_since(first).num_days()).ok()
    }
}

impl fmt::Display for MonthKey {
    /// Renders as `"<Month Abbrev> <Year>"`, e.g. `"Jan 2025"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first_day() {
            Some(first) => write!(f, "{}", first.format("%b %Y")),
            None => write!(f, "{}-{:02}", self.year, self.month),
        }
    }
}

/// One cell of a month series: day-of-month and seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Day of month, as a string
    pub x: String,
    /// Seconds of activity
    pub y: f64,
}

/// Dense per-day series for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSeries {
    /// `"<Month Abbrev> <Year>"`
    pub name: String,
    /// Days `1..=max_day` in ascending order
    pub data: Vec<SeriesPoint>,
}

impl MonthSeries {
    /// Sum of all days in the series
    pub fn total(&self) -> f64 {
        self.data.iter().map(|p| p.y).sum()
    }

    /// Number of days with any recorded activity
    pub fn active_days(&self) -> usize {
        self.data.iter().filter(|p| p.y > 0.0).count()
    }

    /// Day with the most activity; the earliest wins a tie
    pub fn busiest_day(&self) -> Option<&SeriesPoint> {
        self.data
            .iter()
            .filter(|p| p.y > 0.0)
            .fold(None, |best: Option<&SeriesPoint>, p| match best {
                Some(b) if b.y >= p.y => Some(b),
                _ => Some(p),
            })
    }
}

/// Portion of a span that falls inside one local hour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourSegment {
    /// Local hour of day, 0-23
    pub hour: u32,
    /// Seconds within that hour
    pub duration: f64,
}

/// Total seconds recorded in one local hour of the day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyTotal {
    pub hour: u32,
    pub value: f64,
}

/// Calculate totals from aggregated data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_seconds: f64,
    pub active_days: usize,
}

impl Totals {
    pub fn from_daily(daily: &[DailyTotal]) -> Self {
        let mut totals = Self::default();
        for day in daily {
            totals.total_seconds += day.value;
            if day.value > 0.0 {
                totals.active_days += 1;
            }
        }
        totals
    }

    pub fn from_series(series: &[MonthSeries]) -> Self {
        Self {
            total_seconds: series.iter().map(MonthSeries::total).sum(),
            active_days: series.iter().map(MonthSeries::active_days).sum(),
        }
    }
}
