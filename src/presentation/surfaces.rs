// Rendering sinks - tracing-backed stand-ins for a display frontend
use crate::application::chart_surface::{ChartFrame, ChartSurface};
use crate::application::poller::Connectivity;
use crate::domain::snapshot::Readouts;

/// Operator display for live readouts and link state.
pub trait ReadoutSink: Send + Sync {
    fn update(&self, readouts: &Readouts);
    fn connectivity(&self, status: Connectivity);
}

/// Confirmation gate for destructive actions.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Chart backend that logs redraw pushes instead of painting.
#[derive(Debug, Default)]
pub struct TraceChartSurface;

impl ChartSurface for TraceChartSurface {
    fn redraw(&self, frame: &ChartFrame<'_>) {
        let latest: Vec<(&str, Option<f64>)> = frame
            .series
            .iter()
            .map(|s| (s.name, s.values.last().copied().flatten()))
            .collect();
        tracing::debug!(
            chart = frame.chart,
            points = frame.labels.len(),
            ?latest,
            "redraw"
        );
    }
}

/// Readout sink that logs values instead of driving a display.
#[derive(Debug, Default)]
pub struct TraceReadoutSink;

impl ReadoutSink for TraceReadoutSink {
    fn update(&self, readouts: &Readouts) {
        tracing::info!(
            total_power = %readouts.total_power,
            neutral_current = ?readouts.neutral_current,
            "readouts"
        );
    }

    fn connectivity(&self, status: Connectivity) {
        match status {
            Connectivity::Connected => tracing::info!("sensor node connected"),
            Connectivity::Disconnected => tracing::warn!("sensor node disconnected"),
        }
    }
}

/// Headless confirmation policy: decline every destructive action.
#[derive(Debug, Default)]
pub struct NoPrompt;

impl Confirm for NoPrompt {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}
