//! Common test utilities and helpers for hackastats tests
//!
//! Builders and fixtures shared by the integration test binaries.

use chrono::{DateTime, Utc};
use hackastats::Span;
use tempfile::TempDir;

/// Builder for creating test Span instances
pub struct SpanBuilder {
    start: DateTime<Utc>,
    wall_clock_secs: i64,
    duration: Option<f64>,
}

impl SpanBuilder {
    /// Start at an RFC 3339 instant with a one-minute span
    pub fn starting_at(rfc3339: &str) -> Self {
        Self {
            start: DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
            wall_clock_secs: 60,
            duration: Some(60.0),
        }
    }

    /// Wall-clock length; the recorded duration follows unless overridden
    pub fn lasting(mut self, secs: i64) -> Self {
        self.wall_clock_secs = secs;
        self.duration = Some(secs as f64);
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    #[allow(dead_code)]
    pub fn without_duration(mut self) -> Self {
        self.duration = None;
        self
    }

    pub fn build(self) -> Span {
        let start_time = self.start.timestamp();
        Span {
            start_time,
            end_time: start_time + self.wall_clock_secs,
            duration: self.duration,
        }
    }
}

/// Spans covering three months around a year boundary
#[allow(dead_code)]
pub fn sample_spans() -> Vec<Span> {
    vec![
        SpanBuilder::starting_at("2024-12-30T22:15:00Z").lasting(5400).build(),
        SpanBuilder::starting_at("2024-12-31T09:00:00Z").lasting(1800).build(),
        SpanBuilder::starting_at("2025-01-02T10:59:30Z").lasting(60).build(),
        SpanBuilder::starting_at("2025-01-02T14:00:00Z")
            .lasting(3600)
            .with_duration(3000.0)
            .build(),
        SpanBuilder::starting_at("2025-02-01T08:00:00Z").lasting(600).build(),
    ]
}

/// Write a span document into a fresh temp dir
#[allow(dead_code)]
pub fn write_span_document(spans: &[Span]) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("spans.json");
    let body = serde_json::json!({ "spans": spans });
    std::fs::write(&path, serde_json::to_string(&body).unwrap()).unwrap();
    (temp_dir, path)
}
