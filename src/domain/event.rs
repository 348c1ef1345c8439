// Recording session (event) domain model
use serde::Deserialize;

use super::log_record::LogRecord;

/// Summary row as served by the events listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventSummary {
    pub id: i64,
    pub name: String,
    pub start_time: f64,
    #[serde(default)]
    pub end_time: Option<f64>,
    /// Whether the recorder is currently attached to this session.
    #[serde(default)]
    pub is_active: bool,
}

/// Session lifecycle: Created -> Recording -> Closed. `is_active` is
/// authoritative for Recording, `end_time` for Closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Created,
    Recording,
    Closed,
}

impl EventStatus {
    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Created => "Created",
            EventStatus::Recording => "Recording…",
            EventStatus::Closed => "Closed",
        }
    }
}

impl EventSummary {
    pub fn status(&self) -> EventStatus {
        if self.is_active {
            EventStatus::Recording
        } else if self.end_time.is_some() {
            EventStatus::Closed
        } else {
            EventStatus::Created
        }
    }

    /// Table cell: a closed session shows its length in minutes to one
    /// decimal, a recording one shows "Running", a fresh one "-".
    pub fn duration_label(&self) -> String {
        match self.end_time {
            Some(end) => minutes_label(self.start_time, end),
            None if self.is_active => "Running".to_string(),
            None => "-".to_string(),
        }
    }
}

/// Detail-view header fields for one session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventDetail {
    pub name: String,
    pub start_time: f64,
    #[serde(default)]
    pub end_time: Option<f64>,
}

impl EventDetail {
    /// Header cell: a fixed duration once closed, "Open" while the session
    /// can still grow.
    pub fn duration_label(&self) -> String {
        match self.end_time {
            Some(end) => minutes_label(self.start_time, end),
            None => "Open".to_string(),
        }
    }
}

/// Detail payload: header plus the session's full ordered log.
#[derive(Debug, Clone, PartialEq)]
pub struct EventWithLogs {
    pub details: EventDetail,
    pub logs: Vec<LogRecord>,
}

/// Recorder state as reported by the sensor node.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RecordingStatus {
    pub recording: bool,
    #[serde(default)]
    pub event_id: Option<i64>,
}

fn minutes_label(start: f64, end: f64) -> String {
    format!("{:.1} min", (end - start) / 60.0)
}
