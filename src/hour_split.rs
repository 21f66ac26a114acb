//! Splitting spans across local hour boundaries
//!
//! A span that straddles one or more hour boundaries contributes a partial
//! duration to every local hour it touches. Hour boundaries are located from
//! the local minute and second of each step, so zones with non-whole-hour
//! offsets and DST transitions land on the correct local `:00`.
//!
//! Two paths exist on purpose. When a span starts and ends inside the same
//! local hour of the same local day, the span's recorded `duration` is
//! returned as-is. Otherwise durations are wall-clock seconds between the
//! span's instants and the recorded `duration` is not consulted.

use chrono::Timelike;
use hackastats_core::timezone::TimezoneConfig;
use hackastats_core::types::{HourSegment, HourlyTotal, Span};
use tracing::warn;

const SECONDS_PER_HOUR: i64 = 3600;

/// Hours in a day, and the length of an hourly profile
pub const HOURS_PER_DAY: usize = 24;

/// Decompose a span into per-hour segments in chronological order
///
/// Spans with `end_time <= start_time` yield at most one segment. Spans whose
/// instants cannot be represented yield none.
///
/// # Examples
/// ```
/// use hackastats::hour_split::split_span_across_hours;
/// use hackastats_core::{timezone::TimezoneConfig, types::Span};
///
/// // 10:59:30Z to 11:00:30Z
/// let span = Span::new(1_740_826_770, 1_740_826_830, 60.0);
/// let segments = split_span_across_hours(&span, &TimezoneConfig::utc());
/// assert_eq!(segments.len(), 2);
/// assert_eq!((segments[0].hour, segments[0].duration), (10, 30.0));
/// assert_eq!((segments[1].hour, segments[1].duration), (11, 30.0));
/// ```
pub fn split_span_across_hours(span: &Span, timezone: &TimezoneConfig) -> Vec<HourSegment> {
    let (Some(start), Some(end)) = (
        timezone.localize(span.start_time),
        timezone.localize(span.end_time),
    ) else {
        warn!(
            "Skipping span with unrepresentable instants: {}..{}",
            span.start_time, span.end_time
        );
        return Vec::new();
    };

    if start.date_naive() == end.date_naive() && start.hour() == end.hour() {
        return vec![HourSegment {
            hour: start.hour(),
            duration: span.duration_secs(),
        }];
    }

    let mut segments = Vec::new();
    let mut current = span.start_time;

    while current < span.end_time {
        let Some(local) = timezone.localize(current) else {
            break;
        };

        let into_hour = i64::from(local.minute()) * 60 + i64::from(local.second());
        let end_of_hour = current - into_hour + SECONDS_PER_HOUR;
        let segment_end = end_of_hour.min(span.end_time);
        let segment_duration = segment_end - current;

        if segment_duration > 0 {
            segments.push(HourSegment {
                hour: local.hour(),
                duration: segment_duration as f64,
            });
        }

        // end_of_hour is always past current, so this strictly advances
        current = segment_end;
    }

    segments
}

/// Sum hour segments of every span into a dense 24-hour profile
pub fn aggregate_hourly(spans: &[Span], timezone: &TimezoneConfig) -> Vec<HourlyTotal> {
    let mut hours = [0.0f64; HOURS_PER_DAY];

    for span in spans {
        for segment in split_span_across_hours(span, timezone) {
            if let Some(slot) = hours.get_mut(segment.hour as usize) {
                *slot += segment.duration;
            }
        }
    }

    hours
        .iter()
        .enumerate()
        .map(|(hour, &value)| HourlyTotal {
            hour: hour as u32,
            value,
        })
        .collect()
}
