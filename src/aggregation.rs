//! Aggregation module for turning spans into heatmap data
//!
//! This module groups raw activity spans into calendar-aligned aggregates:
//! per-date totals, dense per-month day series for a calendar heatmap, and
//! (through [`crate::hour_split`]) a 24-hour activity profile.
//!
//! Nothing here reads the wall clock. The timezone lives on the
//! [`Aggregator`] and the reference instant is passed to every call that
//! needs one, so results are reproducible.
//!
//! # Examples
//!
//! ```
//! use hackastats::aggregation::Aggregator;
//! use hackastats_core::{timezone::TimezoneConfig, types::Span};
//! use chrono::{TimeZone, Utc};
//!
//! let spans = vec![
//!     Span::new(1_740_870_000, 1_740_873_600, 3600.0), // 2025-03-01T23:00Z
//!     Span::new(1_740_960_000, 1_740_961_800, 1800.0), // 2025-03-03T00:00Z
//! ];
//!
//! let daily = Aggregator::aggregate_daily(&spans);
//! assert_eq!(daily[0].date, "2025-03-01");
//!
//! let aggregator = Aggregator::new(TimezoneConfig::utc());
//! let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
//! let series = aggregator.build_month_series(&daily, now);
//! assert_eq!(series[0].name, "Mar 2025");
//! assert_eq!(series[0].data.len(), 10);
//! ```

use crate::hour_split::{aggregate_hourly, split_span_across_hours};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use hackastats_core::error::Result;
use hackastats_core::timezone::TimezoneConfig;
use hackastats_core::types::{
    DailyTotal, HourSegment, HourlyTotal, MonthKey, MonthSeries, SeriesPoint, Span,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Day-of-month to seconds, per month
type MonthGroups = BTreeMap<MonthKey, BTreeMap<u32, f64>>;

/// Main aggregation engine
///
/// Holds the timezone used for "today" and for local hours. Daily totals are
/// always keyed by UTC date.
#[derive(Debug, Clone)]
pub struct Aggregator {
    timezone_config: TimezoneConfig,
}

impl Aggregator {
    /// Create a new Aggregator with the given timezone configuration
    pub fn new(timezone_config: TimezoneConfig) -> Self {
        Self { timezone_config }
    }

    /// Get the timezone configuration
    pub fn timezone_config(&self) -> &TimezoneConfig {
        &self.timezone_config
    }

    /// Sum span durations per UTC calendar date
    ///
    /// A span is attributed entirely to the date its `start_time` falls on.
    /// Missing durations count as zero. The result is in ascending date
    /// order, one entry per date that had at least one span.
    pub fn aggregate_daily(spans: &[Span]) -> Vec<DailyTotal> {
        let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();

        for span in spans {
            match span.start_utc() {
                Ok(start) => {
                    *daily.entry(start.date_naive()).or_insert(0.0) += span.duration_secs();
                }
                Err(e) => warn!("Skipping span: {}", e),
            }
        }

        debug!("Aggregated {} spans into {} days", spans.len(), daily.len());

        daily
            .into_iter()
            .map(|(date, value)| DailyTotal::new(date, value))
            .collect()
    }

    /// Build dense per-month day series, most recent month first
    ///
    /// Each month runs from day 1 to its last day, except the month
    /// containing `now` (in the configured timezone), which stops at today.
    /// Days without a total are filled with zero. Totals with a malformed
    /// date are logged and skipped.
    pub fn build_month_series(&self, totals: &[DailyTotal], now: DateTime<Utc>) -> Vec<MonthSeries> {
        let mut groups = MonthGroups::new();
        for total in totals {
            match total.parse_date() {
                Ok(date) => Self::insert_total(&mut groups, date, total.value),
                Err(e) => warn!("Skipping daily total: {}", e),
            }
        }
        self.series_from_groups(groups, now)
    }

    /// Like [`Aggregator::build_month_series`], but fails on the first
    /// malformed date instead of skipping it
    pub fn try_build_month_series(
        &self,
        totals: &[DailyTotal],
        now: DateTime<Utc>,
    ) -> Result<Vec<MonthSeries>> {
        let mut groups = MonthGroups::new();
        for total in totals {
            Self::insert_total(&mut groups, total.parse_date()?, total.value);
        }
        Ok(self.series_from_groups(groups, now))
    }

    /// Split one span into local-hour segments
    pub fn split_span(&self, span: &Span) -> Vec<HourSegment> {
        split_span_across_hours(span, &self.timezone_config)
    }

    /// 24-hour activity profile in the configured timezone
    pub fn aggregate_hourly(&self, spans: &[Span]) -> Vec<HourlyTotal> {
        aggregate_hourly(spans, &self.timezone_config)
    }

    fn insert_total(groups: &mut MonthGroups, date: NaiveDate, value: f64) {
        let days = groups.entry(MonthKey::from_date(date)).or_default();
        if let Some(previous) = days.insert(date.day(), value) {
            debug!(
                "Duplicate total for {}: {} replaced by {}",
                date, previous, value
            );
        }
    }

    fn series_from_groups(&self, groups: MonthGroups, now: DateTime<Utc>) -> Vec<MonthSeries> {
        let today = self.timezone_config.today(now);
        let current_month = MonthKey::from_date(today);

        groups
            .into_iter()
            .rev()
            .filter_map(|(month, days)| {
                let Some(days_in_month) = month.days_in_month() else {
                    warn!("Skipping month outside the calendar range: {}", month);
                    return None;
                };

                let max_day = if month == current_month {
                    today.day()
                } else {
                    days_in_month
                };

                let data = (1..=max_day)
                    .map(|day| SeriesPoint {
                        x: day.to_string(),
                        y: days.get(&day).copied().unwrap_or(0.0),
                    })
                    .collect();

                Some(MonthSeries {
                    name: month.to_string(),
                    data,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hackastats_core::error::HackastatsError;

    fn ts(rfc3339: &str) -> i64 {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().timestamp()
    }

    fn total(date: &str, value: f64) -> DailyTotal {
        DailyTotal {
            date: date.to_string(),
            value,
        }
    }

    fn june_15_2025() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_daily_uses_utc_start_date() {
        let start = ts("2025-03-01T23:00:00Z");
        let spans = vec![Span::new(start, start + 3600, 3600.0)];
        assert_eq!(
            Aggregator::aggregate_daily(&spans),
            vec![total("2025-03-01", 3600.0)]
        );
    }

    #[test]
    fn test_daily_sums_per_date_and_defaults_missing_duration() {
        let spans = vec![
            Span::new(ts("2025-03-01T08:00:00Z"), ts("2025-03-01T08:10:00Z"), 600.0),
            Span::new(ts("2025-03-01T09:00:00Z"), ts("2025-03-01T09:05:00Z"), 250.0),
            Span {
                start_time: ts("2025-03-02T09:00:00Z"),
                end_time: ts("2025-03-02T09:05:00Z"),
                duration: None,
            },
        ];
        let daily = Aggregator::aggregate_daily(&spans);
        assert_eq!(
            daily,
            vec![total("2025-03-01", 850.0), total("2025-03-02", 0.0)]
        );
    }

    #[test]
    fn test_daily_trusts_recorded_duration() {
        // Ten wall-clock minutes recorded as 42 seconds
        let spans = vec![Span::new(
            ts("2025-03-01T08:00:00Z"),
            ts("2025-03-01T08:10:00Z"),
            42.0,
        )];
        assert_eq!(Aggregator::aggregate_daily(&spans)[0].value, 42.0);
    }

    #[test]
    fn test_daily_empty_and_unrepresentable() {
        assert!(Aggregator::aggregate_daily(&[]).is_empty());
        let spans = vec![
            Span::new(i64::MAX, i64::MAX, 10.0),
            Span::new(ts("2025-03-01T08:00:00Z"), ts("2025-03-01T08:10:00Z"), 5.0),
        ];
        assert_eq!(
            Aggregator::aggregate_daily(&spans),
            vec![total("2025-03-01", 5.0)]
        );
    }

    #[test]
    fn test_current_month_truncated_at_today() {
        let aggregator = Aggregator::new(TimezoneConfig::utc());
        let totals = vec![total("2025-06-03", 100.0), total("2025-05-20", 50.0)];

        let series = aggregator.build_month_series(&totals, june_15_2025());
        assert_eq!(series.len(), 2);

        assert_eq!(series[0].name, "Jun 2025");
        assert_eq!(series[0].data.len(), 15);
        assert_eq!(series[0].data[2].y, 100.0);

        assert_eq!(series[1].name, "May 2025");
        assert_eq!(series[1].data.len(), 31);
        assert_eq!(series[1].data[19].y, 50.0);
    }

    #[test]
    fn test_same_month_of_previous_year_is_not_truncated() {
        let aggregator = Aggregator::new(TimezoneConfig::utc());
        let series = aggregator.build_month_series(&[total("2024-06-01", 1.0)], june_15_2025());
        assert_eq!(series[0].name, "Jun 2024");
        assert_eq!(series[0].data.len(), 30);
    }

    #[test]
    fn test_today_follows_configured_timezone() {
        // 23:30Z on the 15th is already the 16th in Tokyo
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 23, 30, 0).unwrap();
        let totals = vec![total("2025-06-01", 1.0)];

        let utc = Aggregator::new(TimezoneConfig::utc()).build_month_series(&totals, now);
        assert_eq!(utc[0].data.len(), 15);

        let tokyo = Aggregator::new(TimezoneConfig::new(chrono_tz::Asia::Tokyo))
            .build_month_series(&totals, now);
        assert_eq!(tokyo[0].data.len(), 16);
    }

    #[test]
    fn test_months_sorted_reverse_chronologically() {
        let aggregator = Aggregator::new(TimezoneConfig::utc());
        let totals = vec![
            total("2024-12-24", 10.0),
            total("2024-02-29", 20.0),
            total("2025-01-02", 30.0),
        ];
        let names: Vec<String> = aggregator
            .build_month_series(&totals, june_15_2025())
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Jan 2025", "Dec 2024", "Feb 2024"]);
    }

    #[test]
    fn test_series_is_dense_and_ordered() {
        let aggregator = Aggregator::new(TimezoneConfig::utc());
        let series = aggregator.build_month_series(&[total("2024-02-10", 7.0)], june_15_2025());
        let days: Vec<&str> = series[0].data.iter().map(|p| p.x.as_str()).collect();
        let expected: Vec<String> = (1..=29).map(|d| d.to_string()).collect();
        assert_eq!(days, expected);
        assert_eq!(series[0].total(), 7.0);
        assert_eq!(series[0].active_days(), 1);
    }

    #[test]
    fn test_malformed_dates_are_skipped() {
        let aggregator = Aggregator::new(TimezoneConfig::utc());
        let totals = vec![
            total("not-a-date", 5.0),
            total("2025-02-30", 5.0),
            total("2025-4-3", 7.0),
            total("2025-04-02", 9.0),
        ];
        let series = aggregator.build_month_series(&totals, june_15_2025());
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "Apr 2025");
        assert_eq!(series[0].total(), 9.0);
    }

    #[test]
    fn test_strict_variant_reports_malformed_date() {
        let aggregator = Aggregator::new(TimezoneConfig::utc());
        let totals = vec![total("2025-04-02", 9.0), total("2025/04/03", 1.0)];
        let result = aggregator.try_build_month_series(&totals, june_15_2025());
        assert!(matches!(
            result,
            Err(HackastatsError::MalformedDate(d)) if d == "2025/04/03"
        ));

        let ok = aggregator
            .try_build_month_series(&totals[..1], june_15_2025())
            .unwrap();
        assert_eq!(ok.len(), 1);
    }

    #[test]
    fn test_empty_totals_yield_empty_series() {
        let aggregator = Aggregator::new(TimezoneConfig::utc());
        assert!(aggregator.build_month_series(&[], june_15_2025()).is_empty());
    }

    #[test]
    fn test_duplicate_date_keeps_last_value() {
        let aggregator = Aggregator::new(TimezoneConfig::utc());
        let totals = vec![total("2025-04-02", 9.0), total("2025-04-02", 4.0)];
        let series = aggregator.build_month_series(&totals, june_15_2025());
        assert_eq!(series[0].data[1].y, 4.0);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let aggregator = Aggregator::new(TimezoneConfig::utc());
        let spans = vec![
            Span::new(ts("2025-05-01T08:00:00Z"), ts("2025-05-01T09:30:00Z"), 5400.0),
            Span::new(ts("2025-06-02T22:00:00Z"), ts("2025-06-02T23:00:00Z"), 3600.0),
        ];

        let daily_a = Aggregator::aggregate_daily(&spans);
        let daily_b = Aggregator::aggregate_daily(&spans);
        assert_eq!(daily_a, daily_b);

        let series_a = aggregator.build_month_series(&daily_a, june_15_2025());
        let series_b = aggregator.build_month_series(&daily_a, june_15_2025());
        assert_eq!(series_a, series_b);
    }

    #[test]
    fn test_split_and_hourly_use_configured_timezone() {
        let aggregator = Aggregator::new(TimezoneConfig::new(chrono_tz::Asia::Tokyo));
        let span = Span::new(ts("2025-03-01T10:59:30Z"), ts("2025-03-01T11:00:30Z"), 60.0);

        let hours: Vec<u32> = aggregator.split_span(&span).iter().map(|s| s.hour).collect();
        assert_eq!(hours, vec![19, 20]);

        let profile = aggregator.aggregate_hourly(&[span]);
        assert_eq!(profile[19].value, 30.0);
        assert_eq!(profile[20].value, 30.0);
    }
}
