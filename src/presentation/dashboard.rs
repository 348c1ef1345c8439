// Dashboard view controller - live charts, readouts and the session table
use std::future::Future;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;

use crate::application::chart_surface::ChartSurface;
use crate::application::event_service::{EventActionError, EventRow, EventService};
use crate::application::live_charts::LiveChartSet;
use crate::application::monitor_api::MonitorApi;
use crate::application::poller::{
    poll_stream, Connectivity, MonotonicGuard, PollEvent, SnapshotPoller,
};
use crate::domain::snapshot::Readouts;
use crate::presentation::surfaces::{Confirm, ReadoutSink};

/// Owns the live view: its chart context, readout sink, connectivity state
/// and the one polling task that feeds them. Everything is torn down with
/// the controller.
pub struct DashboardController {
    api: Arc<dyn MonitorApi>,
    charts: LiveChartSet,
    events: EventService,
    readouts: Arc<dyn ReadoutSink>,
    guard: MonotonicGuard,
    connectivity: Option<Connectivity>,
    backfill_points: usize,
}

impl DashboardController {
    pub fn new(
        api: Arc<dyn MonitorApi>,
        surface: Arc<dyn ChartSurface>,
        readouts: Arc<dyn ReadoutSink>,
        backfill_points: usize,
    ) -> Self {
        Self {
            charts: LiveChartSet::new(surface),
            events: EventService::new(api.clone()),
            api,
            readouts,
            guard: MonotonicGuard::default(),
            connectivity: None,
            backfill_points,
        }
    }

    pub fn events(&self) -> &EventService {
        &self.events
    }

    pub fn charts(&self) -> &LiveChartSet {
        &self.charts
    }

    pub fn connectivity(&self) -> Option<Connectivity> {
        self.connectivity
    }

    /// Seed the live charts from recent history and load the session
    /// table. Either fetch failing leaves that part empty; live polling
    /// still starts afterwards.
    pub async fn init(&mut self) -> Vec<EventRow> {
        let (history, rows) = futures::join!(
            self.api.history(self.backfill_points),
            self.events.list_rows()
        );
        match history {
            Ok(records) => self.charts.backfill(&records),
            Err(e) => tracing::warn!("history backfill failed: {e:#}"),
        }
        match rows {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("event listing failed: {e:#}");
                Vec::new()
            }
        }
    }

    /// Apply one poll outcome and return the resulting link state. Stale
    /// snapshots from overlapping polls are discarded, but still prove the
    /// link is up.
    pub fn apply(&mut self, event: PollEvent) -> Connectivity {
        match event {
            PollEvent::Snapshot(snapshot) => {
                if self.guard.admit(snapshot.timestamp) {
                    self.readouts.update(&Readouts::from_snapshot(&snapshot));
                    self.charts.apply_snapshot(&snapshot);
                } else {
                    tracing::debug!(
                        timestamp = snapshot.timestamp,
                        discarded = self.guard.discarded(),
                        "discarded out-of-order snapshot"
                    );
                }
                self.set_connectivity(Connectivity::Connected)
            }
            PollEvent::Failed => self.set_connectivity(Connectivity::Disconnected),
        }
    }

    fn set_connectivity(&mut self, status: Connectivity) -> Connectivity {
        if self.connectivity != Some(status) {
            self.readouts.connectivity(status);
            self.connectivity = Some(status);
        }
        status
    }

    /// Rename a session, then refresh the table per the listing contract.
    pub async fn rename_event(
        &self,
        id: i64,
        name: &str,
    ) -> Result<Vec<EventRow>, EventActionError> {
        self.events.rename(id, name).await?;
        Ok(self.events.list_rows().await?)
    }

    /// Delete a session after explicit confirmation. Returns the refreshed
    /// table, or `None` when the operator declined (no request is sent).
    pub async fn delete_event(
        &self,
        id: i64,
        confirm: &dyn Confirm,
    ) -> anyhow::Result<Option<Vec<EventRow>>> {
        if !confirm.confirm("Delete this event and all of its recorded data?") {
            return Ok(None);
        }
        self.events.delete(id).await?;
        Ok(Some(self.events.list_rows().await?))
    }

    /// Run the live view until `shutdown` resolves; the polling task is
    /// disposed on exit so no update can reach a torn-down chart.
    pub async fn run(&mut self, interval: Duration, shutdown: impl Future<Output = ()>) {
        let (poller, rx) = SnapshotPoller::spawn(self.api.clone(), interval);
        let mut events = pin!(poll_stream(rx));
        let mut shutdown = pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                maybe = events.next() => match maybe {
                    Some(event) => {
                        self.apply(event);
                    }
                    None => break,
                },
            }
        }
        poller.stop();
    }
}
