// Snapshot poller - periodic live fetch with connectivity tracking
use std::sync::Arc;
use std::time::Duration;

use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::application::monitor_api::MonitorApi;
use crate::domain::snapshot::SensorSnapshot;

/// Sensor link state as seen from the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Connected,
    Disconnected,
}

/// One poll outcome delivered to the consuming view. A failure leaves the
/// prior chart and readout state untouched; the link is flagged down until
/// the next successful tick.
#[derive(Debug)]
pub enum PollEvent {
    Snapshot(SensorSnapshot),
    Failed,
}

/// Periodic snapshot fetcher. Each tick issues one independent request, so
/// a slow response never blocks the next tick and responses may complete
/// out of order; consumers apply a [`MonotonicGuard`].
pub struct SnapshotPoller {
    handle: JoinHandle<()>,
}

impl SnapshotPoller {
    /// Spawn the polling task and return the outcome channel.
    pub fn spawn(
        api: Arc<dyn MonitorApi>,
        interval: Duration,
    ) -> (Self, mpsc::Receiver<PollEvent>) {
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let api = api.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let event = match api.latest_snapshot().await {
                        Ok(snapshot) => PollEvent::Snapshot(snapshot),
                        Err(e) => {
                            tracing::debug!("snapshot poll failed: {e:#}");
                            PollEvent::Failed
                        }
                    };
                    let _ = tx.send(event).await;
                });
            }
        });
        (Self { handle }, rx)
    }

    /// Stop ticking. Responses already in flight are dropped unseen once
    /// the receiver goes away.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for SnapshotPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Adapt the poll channel into a stream for `StreamExt` consumers.
pub fn poll_stream(mut rx: mpsc::Receiver<PollEvent>) -> impl Stream<Item = PollEvent> {
    async_stream::stream! {
        while let Some(event) = rx.recv().await {
            yield event;
        }
    }
}

/// Discards snapshots that arrive out of chronological order. Overlapping
/// polls may complete in any order; only snapshots at least as new as the
/// last applied one are admitted.
#[derive(Debug, Default)]
pub struct MonotonicGuard {
    last_applied: Option<f64>,
    discarded: u64,
}

impl MonotonicGuard {
    /// Returns true when the snapshot should be applied and records its
    /// timestamp as the new high-water mark.
    pub fn admit(&mut self, timestamp: f64) -> bool {
        match self.last_applied {
            Some(last) if timestamp < last => {
                self.discarded += 1;
                false
            }
            _ => {
                self.last_applied = Some(timestamp);
                true
            }
        }
    }

    pub fn discarded(&self) -> u64 {
        self.discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::monitor_api::mock::MockApi;
    use crate::domain::snapshot::PHASE_COUNT;
    use futures::StreamExt;

    fn snapshot(timestamp: f64) -> SensorSnapshot {
        SensorSnapshot {
            timestamp,
            phases: [None; PHASE_COUNT],
            neutral_current: None,
        }
    }

    #[test]
    fn guard_discards_older_snapshots() {
        let mut guard = MonotonicGuard::default();
        assert!(guard.admit(5.0));
        assert!(!guard.admit(3.0));
        assert!(guard.admit(7.0));
        assert_eq!(guard.discarded(), 1);
    }

    #[test]
    fn guard_admits_duplicate_timestamps() {
        // Polling faster than the sensor updates yields repeats; only
        // strictly older snapshots are discarded.
        let mut guard = MonotonicGuard::default();
        assert!(guard.admit(5.0));
        assert!(guard.admit(5.0));
        assert_eq!(guard.discarded(), 0);
    }

    #[tokio::test]
    async fn poller_reports_success_then_failure() {
        let api = Arc::new(MockApi::default());
        api.snapshots.lock().unwrap().push_back(Ok(snapshot(10.0)));
        // second tick finds the script exhausted and fails

        let (poller, rx) = SnapshotPoller::spawn(api, Duration::from_millis(5));
        let mut events = Box::pin(poll_stream(rx));

        match events.next().await {
            Some(PollEvent::Snapshot(s)) => assert_eq!(s.timestamp, 10.0),
            other => panic!("expected a snapshot, got {other:?}"),
        }
        assert!(matches!(events.next().await, Some(PollEvent::Failed)));
        poller.stop();
    }

    #[tokio::test]
    async fn stopping_the_poller_closes_the_channel() {
        let api = Arc::new(MockApi::default());
        let (poller, rx) = SnapshotPoller::spawn(api, Duration::from_millis(5));
        let mut events = Box::pin(poll_stream(rx));
        let _ = events.next().await;
        poller.stop();
        // draining after abort terminates instead of hanging
        while events.next().await.is_some() {}
    }
}
