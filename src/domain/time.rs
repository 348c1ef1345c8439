// Local-time formatting for chart labels and event headers
use chrono::{DateTime, Local, TimeZone};

fn local(timestamp: f64) -> Option<DateTime<Local>> {
    let secs = timestamp.floor();
    let nanos = ((timestamp - secs) * 1e9).round() as u32;
    Local
        .timestamp_opt(secs as i64, nanos.min(999_999_999))
        .single()
}

/// Wall-clock chart label for an epoch-seconds timestamp.
pub fn time_label(timestamp: f64) -> String {
    match local(timestamp) {
        Some(t) => t.format("%H:%M:%S").to_string(),
        None => format!("{timestamp:.0}"),
    }
}

/// Date plus time string for event start times.
pub fn date_time_label(timestamp: f64) -> String {
    match local(timestamp) {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format!("{timestamp:.0}"),
    }
}
