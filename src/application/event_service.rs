// Event session service - CRUD and recording transitions over the API
use std::sync::Arc;

use thiserror::Error;

use crate::application::monitor_api::{CreateOutcome, MonitorApi};
use crate::domain::event::RecordingStatus;
use crate::domain::time::date_time_label;

#[derive(Debug, Error)]
pub enum EventActionError {
    /// Rejected locally before any request is sent.
    #[error("event name must not be empty")]
    EmptyName,
    /// Business failure reported by the server, surfaced verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Api(#[from] anyhow::Error),
}

/// One render-ready row of the sessions table.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub id: i64,
    pub name: String,
    pub started: String,
    pub duration: String,
    pub status: &'static str,
    pub export_url: String,
}

/// CRUD over recording sessions. The server owns the state transitions;
/// this service invokes them and derives the presentation fields.
#[derive(Clone)]
pub struct EventService {
    api: Arc<dyn MonitorApi>,
}

impl EventService {
    pub fn new(api: Arc<dyn MonitorApi>) -> Self {
        Self { api }
    }

    /// Create a session. The caller navigates to the returned id.
    pub async fn create(&self, name: &str) -> Result<i64, EventActionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EventActionError::EmptyName);
        }
        match self.api.create_event(name).await? {
            CreateOutcome::Created(id) => Ok(id),
            CreateOutcome::Rejected(message) => Err(EventActionError::Rejected(message)),
        }
    }

    /// All sessions as table rows with derived status and duration cells.
    pub async fn list_rows(&self) -> anyhow::Result<Vec<EventRow>> {
        let events = self.api.list_events().await?;
        Ok(events
            .into_iter()
            .map(|event| EventRow {
                started: date_time_label(event.start_time),
                duration: event.duration_label(),
                status: event.status().label(),
                export_url: self.api.export_url(event.id),
                id: event.id,
                name: event.name,
            })
            .collect())
    }

    /// Rename a session. The caller refreshes its listing on success.
    pub async fn rename(&self, id: i64, name: &str) -> Result<(), EventActionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EventActionError::EmptyName);
        }
        self.api.rename_event(id, name).await?;
        Ok(())
    }

    /// Irreversibly delete a session and all of its records. Confirmation
    /// is the calling view's responsibility.
    pub async fn delete(&self, id: i64) -> anyhow::Result<()> {
        self.api.delete_event(id).await
    }

    /// Stable URL for the server-owned CSV export.
    pub fn export_url(&self, id: i64) -> String {
        self.api.export_url(id)
    }

    /// Route recorded samples into the given session.
    pub async fn start_recording(&self, id: i64) -> anyhow::Result<()> {
        self.api.start_recording(id).await
    }

    /// Detach the recorder without closing the session.
    pub async fn stop_recording(&self) -> anyhow::Result<()> {
        self.api.stop_recording().await
    }

    /// Close the active session and detach the recorder.
    pub async fn close_active(&self) -> anyhow::Result<()> {
        self.api.close_active_event().await
    }

    pub async fn recording_status(&self) -> anyhow::Result<RecordingStatus> {
        self.api.recording_status().await
    }
}
