// Event detail view controller
use std::future::Future;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::application::chart_surface::ChartSurface;
use crate::application::event_charts::{AxisOverrides, EventChartSet};
use crate::application::event_service::EventService;
use crate::application::monitor_api::MonitorApi;
use crate::domain::time::date_time_label;

/// Header fields shown above the session charts.
#[derive(Debug, Clone, PartialEq)]
pub struct EventHeader {
    pub name: String,
    pub started: String,
    /// Fixed once closed, "Open" while the session can still grow.
    pub duration: String,
    pub points: usize,
    pub export_url: String,
}

/// Owns the detail view for one session: its chart context, the operator
/// controls (tail limit, axis overrides) and the refresh cadence. The
/// session is referenced by id; every refresh refetches it whole.
pub struct EventViewController {
    api: Arc<dyn MonitorApi>,
    events: EventService,
    charts: EventChartSet,
    event_id: i64,
    point_limit: usize,
    overrides: AxisOverrides,
}

impl EventViewController {
    pub fn new(api: Arc<dyn MonitorApi>, surface: Arc<dyn ChartSurface>, event_id: i64) -> Self {
        Self {
            events: EventService::new(api.clone()),
            charts: EventChartSet::new(surface),
            api,
            event_id,
            point_limit: 0,
            overrides: AxisOverrides::default(),
        }
    }

    pub fn event_id(&self) -> i64 {
        self.event_id
    }

    pub fn charts(&self) -> &EventChartSet {
        &self.charts
    }

    /// Adjust the tail limit and axis overrides; they apply on the next
    /// refresh (the manual "update charts" trigger calls [`Self::refresh`]).
    pub fn set_controls(&mut self, point_limit: usize, overrides: AxisOverrides) {
        self.point_limit = point_limit;
        self.overrides = overrides;
    }

    /// Refetch the session and rebuild the header and all charts with the
    /// current controls. Always a full rebuild, never incremental.
    pub async fn refresh(&mut self) -> Result<EventHeader> {
        let detail = self.api.event_detail(self.event_id).await?;
        self.charts
            .render(&detail.logs, self.point_limit, &self.overrides);
        Ok(EventHeader {
            name: detail.details.name.clone(),
            started: date_time_label(detail.details.start_time),
            duration: detail.details.duration_label(),
            points: detail.logs.len(),
            export_url: self.events.export_url(self.event_id),
        })
    }

    /// Whether the recorder is currently routing samples into this session.
    pub async fn is_recording(&self) -> Result<bool> {
        let status = self.events.recording_status().await?;
        Ok(status.recording && status.event_id == Some(self.event_id))
    }

    pub async fn start_recording(&self) -> Result<()> {
        self.events.start_recording(self.event_id).await
    }

    /// The stop control closes the session and detaches the recorder.
    pub async fn stop_recording(&self) -> Result<()> {
        self.events.close_active().await
    }

    /// Refresh charts and recording status once per tick until `shutdown`
    /// resolves. A transient failure leaves the previous render untouched.
    /// The timer dies with this call, so nothing can update a torn-down
    /// view.
    pub async fn run(&mut self, interval: Duration, shutdown: impl Future<Output = ()>) {
        let mut ticker = tokio::time::interval(interval);
        let mut shutdown = pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    if let Err(e) = self.refresh().await {
                        tracing::warn!("event refresh failed: {e:#}");
                    }
                    match self.is_recording().await {
                        Ok(recording) => tracing::debug!(recording, "session status"),
                        Err(e) => tracing::debug!("recording status poll failed: {e:#}"),
                    }
                }
            }
        }
    }
}
