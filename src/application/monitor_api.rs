// Client trait for the sensor node HTTP API
use crate::domain::event::{EventSummary, EventWithLogs, RecordingStatus};
use crate::domain::log_record::LogRecord;
use crate::domain::snapshot::SensorSnapshot;
use async_trait::async_trait;

/// Server-side outcome of a create call: the new event id, or the server's
/// rejection message (surfaced verbatim to the operator).
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(i64),
    Rejected(String),
}

#[async_trait]
pub trait MonitorApi: Send + Sync {
    /// Latest live snapshot.
    async fn latest_snapshot(&self) -> anyhow::Result<SensorSnapshot>;

    /// Most recent persisted records, oldest first.
    async fn history(&self, limit: usize) -> anyhow::Result<Vec<LogRecord>>;

    /// All recording sessions.
    async fn list_events(&self) -> anyhow::Result<Vec<EventSummary>>;

    async fn create_event(&self, name: &str) -> anyhow::Result<CreateOutcome>;

    async fn rename_event(&self, id: i64, name: &str) -> anyhow::Result<()>;

    /// Delete a session and every log it owns.
    async fn delete_event(&self, id: i64) -> anyhow::Result<()>;

    /// Header fields plus the full ordered log for one session.
    async fn event_detail(&self, id: i64) -> anyhow::Result<EventWithLogs>;

    /// Stable URL of the server-generated CSV export.
    fn export_url(&self, id: i64) -> String;

    /// Route recorded samples into the given session.
    async fn start_recording(&self, id: i64) -> anyhow::Result<()>;

    /// Detach the recorder without closing the session.
    async fn stop_recording(&self) -> anyhow::Result<()>;

    /// Close the active session (sets its end time) and detach the recorder.
    async fn close_active_event(&self) -> anyhow::Result<()>;

    async fn recording_status(&self) -> anyhow::Result<RecordingStatus>;
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scriptable in-memory double for service and view tests. Every call
    /// is appended to `calls` so tests can assert that a validation failure
    /// sends no request.
    #[derive(Default)]
    pub(crate) struct MockApi {
        pub snapshots: Mutex<VecDeque<anyhow::Result<SensorSnapshot>>>,
        pub logs: Mutex<Vec<LogRecord>>,
        pub events: Mutex<Vec<EventSummary>>,
        pub detail: Mutex<Option<EventWithLogs>>,
        pub create_outcome: Mutex<Option<CreateOutcome>>,
        pub status: Mutex<Option<RecordingStatus>>,
        pub calls: Mutex<Vec<String>>,
    }

    impl MockApi {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MonitorApi for MockApi {
        async fn latest_snapshot(&self) -> anyhow::Result<SensorSnapshot> {
            self.record("latest_snapshot");
            self.snapshots
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(anyhow::anyhow!("no scripted snapshot")))
        }

        async fn history(&self, limit: usize) -> anyhow::Result<Vec<LogRecord>> {
            self.record(format!("history {limit}"));
            Ok(self.logs.lock().unwrap().clone())
        }

        async fn list_events(&self) -> anyhow::Result<Vec<EventSummary>> {
            self.record("list_events");
            Ok(self.events.lock().unwrap().clone())
        }

        async fn create_event(&self, name: &str) -> anyhow::Result<CreateOutcome> {
            self.record(format!("create_event {name}"));
            Ok(self
                .create_outcome
                .lock()
                .unwrap()
                .clone()
                .unwrap_or(CreateOutcome::Created(1)))
        }

        async fn rename_event(&self, id: i64, name: &str) -> anyhow::Result<()> {
            self.record(format!("rename_event {id} {name}"));
            Ok(())
        }

        async fn delete_event(&self, id: i64) -> anyhow::Result<()> {
            self.record(format!("delete_event {id}"));
            Ok(())
        }

        async fn event_detail(&self, id: i64) -> anyhow::Result<EventWithLogs> {
            self.record(format!("event_detail {id}"));
            self.detail
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| anyhow::anyhow!("event {id} not found"))
        }

        fn export_url(&self, id: i64) -> String {
            format!("http://node.test/api/events/{id}/export")
        }

        async fn start_recording(&self, id: i64) -> anyhow::Result<()> {
            self.record(format!("start_recording {id}"));
            Ok(())
        }

        async fn stop_recording(&self) -> anyhow::Result<()> {
            self.record("stop_recording");
            Ok(())
        }

        async fn close_active_event(&self) -> anyhow::Result<()> {
            self.record("close_active_event");
            Ok(())
        }

        async fn recording_status(&self) -> anyhow::Result<RecordingStatus> {
            self.record("recording_status");
            Ok(self.status.lock().unwrap().unwrap_or(RecordingStatus {
                recording: false,
                event_id: None,
            }))
        }
    }
}
