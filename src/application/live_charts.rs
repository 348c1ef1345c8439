// Live chart set - rolling buffers fed by the snapshot poller
use std::collections::VecDeque;
use std::sync::Arc;

use crate::application::chart_surface::{ChartFrame, ChartSurface, SeriesFrame};
use crate::domain::log_record::LogRecord;
use crate::domain::snapshot::SensorSnapshot;
use crate::domain::time::time_label;

/// Fixed capacity of every live chart buffer.
pub const LIVE_CHART_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
struct RollingSeries {
    name: &'static str,
    values: VecDeque<Option<f64>>,
}

/// Bounded multi-series time series. Labels and every series always hold
/// the same number of entries; at capacity the oldest column is evicted
/// before a new one is appended.
#[derive(Debug, Clone)]
pub struct RollingChart {
    name: &'static str,
    labels: VecDeque<String>,
    series: Vec<RollingSeries>,
    capacity: usize,
}

impl RollingChart {
    pub fn new(name: &'static str, series_names: &[&'static str], capacity: usize) -> Self {
        Self {
            name,
            labels: VecDeque::with_capacity(capacity),
            series: series_names
                .iter()
                .map(|&name| RollingSeries {
                    name,
                    values: VecDeque::with_capacity(capacity),
                })
                .collect(),
            capacity,
        }
    }

    /// Append one sample column. `values` carries one entry per series; a
    /// missing position becomes a gap (`None`) so labels and series can
    /// never drift apart.
    pub fn append(&mut self, label: String, values: &[Option<f64>]) {
        if values.len() != self.series.len() {
            tracing::warn!(
                chart = self.name,
                got = values.len(),
                expected = self.series.len(),
                "series value count mismatch; missing positions become gaps"
            );
        }
        if self.labels.len() >= self.capacity {
            // evict the oldest column from labels and every series together
            self.labels.pop_front();
            for series in &mut self.series {
                series.values.pop_front();
            }
        }
        self.labels.push_back(label);
        for (idx, series) in self.series.iter_mut().enumerate() {
            series.values.push_back(values.get(idx).copied().flatten());
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn frame(&self) -> ChartFrame<'_> {
        ChartFrame {
            chart: self.name,
            labels: self.labels.iter().map(String::as_str).collect(),
            series: self
                .series
                .iter()
                .map(|s| SeriesFrame {
                    name: s.name,
                    values: s.values.iter().copied().collect(),
                })
                .collect(),
            y_max: None,
        }
    }
}

/// The three coordinated dashboard charts, fed either live from the poller
/// or from the history backfill.
pub struct LiveChartSet {
    voltage: RollingChart,
    current: RollingChart,
    power: RollingChart,
    surface: Arc<dyn ChartSurface>,
}

impl LiveChartSet {
    pub fn new(surface: Arc<dyn ChartSurface>) -> Self {
        Self {
            voltage: RollingChart::new("voltage", &["L1", "L2", "L3"], LIVE_CHART_CAPACITY),
            current: RollingChart::new("current", &["L1", "L2", "L3", "N"], LIVE_CHART_CAPACITY),
            power: RollingChart::new("power", &["Total", "L1", "L2", "L3"], LIVE_CHART_CAPACITY),
            surface,
        }
    }

    pub fn voltage(&self) -> &RollingChart {
        &self.voltage
    }

    pub fn current(&self) -> &RollingChart {
        &self.current
    }

    pub fn power(&self) -> &RollingChart {
        &self.power
    }

    /// Append one live sample across all three charts and push redraws.
    pub fn apply_snapshot(&mut self, snapshot: &SensorSnapshot) {
        self.push(
            time_label(snapshot.timestamp),
            [
                snapshot.voltage(1),
                snapshot.voltage(2),
                snapshot.voltage(3),
            ],
            [
                snapshot.current(1),
                snapshot.current(2),
                snapshot.current(3),
                snapshot.neutral_current,
            ],
            [
                Some(snapshot.total_power()),
                snapshot.power(1),
                snapshot.power(2),
                snapshot.power(3),
            ],
        );
    }

    /// Append one persisted record, exactly as a live sample would be.
    pub fn apply_record(&mut self, record: &LogRecord) {
        self.push(
            time_label(record.timestamp),
            [record.p1_v, record.p2_v, record.p3_v],
            [record.p1_i, record.p2_i, record.p3_i, record.neutral_i],
            [
                Some(record.total_power()),
                record.p1_p,
                record.p2_p,
                record.p3_p,
            ],
        );
    }

    /// Seed the charts from recent history, oldest first.
    pub fn backfill(&mut self, records: &[LogRecord]) {
        for record in records {
            self.apply_record(record);
        }
    }

    fn push(
        &mut self,
        label: String,
        voltage: [Option<f64>; 3],
        current: [Option<f64>; 4],
        power: [Option<f64>; 4],
    ) {
        self.voltage.append(label.clone(), &voltage);
        self.current.append(label.clone(), &current);
        self.power.append(label, &power);
        self.surface.redraw(&self.voltage.frame());
        self.surface.redraw(&self.current.frame());
        self.surface.redraw(&self.power.frame());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_surface::testing::RecordingSurface;
    use crate::domain::snapshot::PhaseReading;

    fn chart(capacity: usize) -> RollingChart {
        RollingChart::new("test", &["a", "b"], capacity)
    }

    #[test]
    fn length_is_bounded_by_capacity() {
        let mut c = chart(100);
        for i in 0..250 {
            c.append(format!("t{i}"), &[Some(i as f64), None]);
        }
        assert_eq!(c.len(), 100);
        let frame = c.frame();
        for series in &frame.series {
            assert_eq!(series.values.len(), 100);
        }
    }

    #[test]
    fn eviction_is_fifo_and_synchronized() {
        let mut c = chart(100);
        for i in 0..101 {
            c.append(format!("t{i}"), &[Some(i as f64), Some(-(i as f64))]);
        }
        let frame = c.frame();
        assert_eq!(frame.labels.len(), 100);
        assert_eq!(frame.labels[0], "t1");
        assert_eq!(frame.labels[99], "t100");
        assert_eq!(frame.series[0].values[0], Some(1.0));
        assert_eq!(frame.series[1].values[0], Some(-1.0));
        assert_eq!(frame.series[0].values[99], Some(100.0));
    }

    #[test]
    fn short_value_slices_become_gaps_not_drift() {
        let mut c = chart(10);
        c.append("t0".to_string(), &[Some(1.0)]);
        let frame = c.frame();
        assert_eq!(frame.series[0].values, vec![Some(1.0)]);
        assert_eq!(frame.series[1].values, vec![None]);
    }

    fn partial_snapshot() -> SensorSnapshot {
        SensorSnapshot {
            timestamp: 1000.0,
            phases: [
                Some(PhaseReading {
                    voltage: Some(230.0),
                    current: Some(2.0),
                    power: Some(460.0),
                    ..Default::default()
                }),
                None,
                None,
            ],
            neutral_current: Some(1.5),
        }
    }

    #[test]
    fn snapshot_with_unreachable_phases_keeps_alignment() {
        let surface = Arc::new(RecordingSurface::default());
        let mut charts = LiveChartSet::new(surface.clone());
        charts.apply_snapshot(&partial_snapshot());

        let voltage = surface.last("voltage");
        assert_eq!(voltage.values_of("L1"), &[Some(230.0)]);
        assert_eq!(voltage.values_of("L2"), &[None]);
        assert_eq!(voltage.values_of("L3"), &[None]);

        let current = surface.last("current");
        assert_eq!(current.values_of("N"), &[Some(1.5)]);

        let power = surface.last("power");
        assert_eq!(power.values_of("Total"), &[Some(460.0)]);
        assert_eq!(power.values_of("L2"), &[None]);
    }

    #[test]
    fn every_sample_pushes_one_redraw_per_chart() {
        let surface = Arc::new(RecordingSurface::default());
        let mut charts = LiveChartSet::new(surface.clone());
        charts.apply_snapshot(&partial_snapshot());
        charts.apply_snapshot(&partial_snapshot());
        assert_eq!(surface.redraw_count(), 6);
    }

    #[test]
    fn backfill_feeds_records_in_order() {
        let surface = Arc::new(RecordingSurface::default());
        let mut charts = LiveChartSet::new(surface.clone());
        let records: Vec<LogRecord> = (0..3)
            .map(|i| {
                serde_json::from_str(&format!(
                    r#"{{"timestamp": {}, "p1_v": {}, "p1_p": 100.0}}"#,
                    1000 + i,
                    230 + i
                ))
                .unwrap()
            })
            .collect();
        charts.backfill(&records);

        assert_eq!(charts.voltage().len(), 3);
        let voltage = surface.last("voltage");
        assert_eq!(
            voltage.values_of("L1"),
            &[Some(230.0), Some(231.0), Some(232.0)]
        );
        let power = surface.last("power");
        assert_eq!(
            power.values_of("Total"),
            &[Some(100.0), Some(100.0), Some(100.0)]
        );
    }
}
