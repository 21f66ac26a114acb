//! Human-readable duration formatting
//!
//! Used by table output and report footers.

const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Format seconds as a compact duration
///
/// # Examples
/// ```
/// use hackastats_core::format::human_time;
///
/// assert_eq!(human_time(0.0), "0s");
/// assert_eq!(human_time(42.0), "<1m");
/// assert_eq!(human_time(125.0), "2m");
/// assert_eq!(human_time(3725.0), "1h 2m");
/// ```
pub fn human_time(seconds: f64) -> String {
    if seconds <= 0.0 || !seconds.is_finite() {
        return "0s".to_string();
    }

    let hours = (seconds / SECONDS_PER_HOUR).floor();
    let minutes = ((seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE).floor();

    if hours == 0.0 && minutes == 0.0 {
        "<1m".to_string()
    } else if hours == 0.0 {
        format!("{minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}

/// Minutes component of a duration, ignoring whole hours
pub fn minutes_of_hour(seconds: f64) -> String {
    if seconds <= 0.0 || !seconds.is_finite() {
        return "0".to_string();
    }
    ((seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE)
        .floor()
        .to_string()
}
