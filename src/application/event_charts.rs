// Historical chart assembly for one recording session
use std::sync::Arc;

use crate::application::chart_surface::{ChartFrame, ChartSurface, SeriesFrame};
use crate::domain::log_record::LogRecord;
use crate::domain::time::time_label;

/// Per-chart Y-axis maximum overrides as entered by the operator. Raw
/// values are sanitized at render time; only finite positive numbers clamp.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisOverrides {
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    pub power: Option<f64>,
}

/// Only a finite, strictly positive override clamps the axis.
pub fn axis_max(raw: Option<f64>) -> Option<f64> {
    raw.filter(|v| v.is_finite() && *v > 0.0)
}

/// Parse a text-field override. Empty, non-numeric, zero and negative
/// inputs all mean "auto-scale".
pub fn parse_axis_override(input: &str) -> Option<f64> {
    axis_max(input.trim().parse().ok())
}

/// One fully-rebuilt (non-rolling) detail chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionChart {
    name: &'static str,
    labels: Vec<String>,
    series: Vec<(&'static str, Vec<Option<f64>>)>,
    y_max: Option<f64>,
}

impl SessionChart {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            labels: Vec::new(),
            series: Vec::new(),
            y_max: None,
        }
    }

    // Full replacement, never incremental.
    fn replace(
        &mut self,
        labels: Vec<String>,
        series: Vec<(&'static str, Vec<Option<f64>>)>,
        y_max: Option<f64>,
    ) {
        self.labels = labels;
        self.series = series;
        self.y_max = y_max;
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn y_max(&self) -> Option<f64> {
        self.y_max
    }

    pub fn frame(&self) -> ChartFrame<'_> {
        ChartFrame {
            chart: self.name,
            labels: self.labels.iter().map(String::as_str).collect(),
            series: self
                .series
                .iter()
                .map(|(name, values)| SeriesFrame {
                    name,
                    values: values.clone(),
                })
                .collect(),
            y_max: self.y_max,
        }
    }
}

/// Builds the three event-detail charts from a fetched log. Every call
/// recomputes the full dataset from scratch; there is no eviction and no
/// diffing, so identical inputs always produce identical charts.
pub struct EventChartSet {
    voltage: SessionChart,
    current: SessionChart,
    power: SessionChart,
    surface: Arc<dyn ChartSurface>,
}

impl EventChartSet {
    pub fn new(surface: Arc<dyn ChartSurface>) -> Self {
        Self {
            voltage: SessionChart::new("voltage"),
            current: SessionChart::new("current"),
            power: SessionChart::new("power"),
            surface,
        }
    }

    pub fn voltage(&self) -> &SessionChart {
        &self.voltage
    }

    pub fn current(&self) -> &SessionChart {
        &self.current
    }

    pub fn power(&self) -> &SessionChart {
        &self.power
    }

    /// Rebuild all charts from `logs`. A positive `point_limit` keeps only
    /// the most recent records in view; stored data is untouched.
    pub fn render(&mut self, logs: &[LogRecord], point_limit: usize, overrides: &AxisOverrides) {
        let display = if point_limit > 0 && logs.len() > point_limit {
            &logs[logs.len() - point_limit..]
        } else {
            logs
        };
        let labels: Vec<String> = display.iter().map(|l| time_label(l.timestamp)).collect();

        self.voltage.replace(
            labels.clone(),
            vec![
                ("L1", display.iter().map(|l| l.p1_v).collect()),
                ("L2", display.iter().map(|l| l.p2_v).collect()),
                ("L3", display.iter().map(|l| l.p3_v).collect()),
            ],
            axis_max(overrides.voltage),
        );
        self.current.replace(
            labels.clone(),
            vec![
                ("L1", display.iter().map(|l| l.p1_i).collect()),
                ("L2", display.iter().map(|l| l.p2_i).collect()),
                ("L3", display.iter().map(|l| l.p3_i).collect()),
                ("N", display.iter().map(|l| l.neutral_i).collect()),
            ],
            axis_max(overrides.current),
        );
        self.power.replace(
            labels,
            vec![
                (
                    "Total",
                    display.iter().map(|l| Some(l.total_power())).collect(),
                ),
                ("L1", display.iter().map(|l| l.p1_p).collect()),
            ],
            axis_max(overrides.power),
        );

        self.surface.redraw(&self.voltage.frame());
        self.surface.redraw(&self.current.frame());
        self.surface.redraw(&self.power.frame());
    }
}
