// Live sensor snapshot domain model

/// Number of monitored phases (L1..L3).
pub const PHASE_COUNT: usize = 3;

/// One phase's instantaneous readings. Any field may be absent when the
/// meter returns a partial frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseReading {
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    pub power: Option<f64>,
    pub energy: Option<f64>,
    pub frequency: Option<f64>,
    pub pf: Option<f64>,
}

/// One instantaneous reading set across all phases. Produced once per poll
/// tick and consumed immediately; never persisted client-side.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSnapshot {
    /// Seconds since epoch, as reported by the sensor node.
    pub timestamp: f64,
    /// Indexed by phase 1..=3; `None` when that phase's sensor is unreachable.
    pub phases: [Option<PhaseReading>; PHASE_COUNT],
    pub neutral_current: Option<f64>,
}

impl SensorSnapshot {
    fn phase(&self, phase: usize) -> Option<&PhaseReading> {
        self.phases.get(phase.checked_sub(1)?)?.as_ref()
    }

    pub fn voltage(&self, phase: usize) -> Option<f64> {
        self.phase(phase).and_then(|p| p.voltage)
    }

    pub fn current(&self, phase: usize) -> Option<f64> {
        self.phase(phase).and_then(|p| p.current)
    }

    pub fn power(&self, phase: usize) -> Option<f64> {
        self.phase(phase).and_then(|p| p.power)
    }

    /// Sum of the per-phase power readings that are present; an unreachable
    /// phase contributes 0.
    pub fn total_power(&self) -> f64 {
        (1..=PHASE_COUNT).filter_map(|n| self.power(n)).sum()
    }
}

/// Operator-facing readout values for one snapshot: per-phase readings
/// verbatim, total power formatted to one decimal.
#[derive(Debug, Clone, PartialEq)]
pub struct Readouts {
    pub phases: [Option<PhaseReading>; PHASE_COUNT],
    pub neutral_current: Option<f64>,
    pub total_power: String,
}

impl Readouts {
    pub fn from_snapshot(snapshot: &SensorSnapshot) -> Self {
        Self {
            phases: snapshot.phases,
            neutral_current: snapshot.neutral_current,
            total_power: format!("{:.1}", snapshot.total_power()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_phase_snapshot() -> SensorSnapshot {
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
    fn total_power_treats_missing_phases_as_zero() {
        assert_eq!(single_phase_snapshot().total_power(), 460.0);
    }

    #[test]
    fn accessors_return_none_for_unreachable_phases() {
        let snapshot = single_phase_snapshot();
        assert_eq!(snapshot.voltage(1), Some(230.0));
        assert_eq!(snapshot.voltage(2), None);
        assert_eq!(snapshot.power(3), None);
        assert_eq!(snapshot.voltage(0), None);
        assert_eq!(snapshot.voltage(4), None);
    }

    #[test]
    fn readout_total_power_has_one_decimal() {
        let readouts = Readouts::from_snapshot(&single_phase_snapshot());
        assert_eq!(readouts.total_power, "460.0");
        assert_eq!(readouts.neutral_current, Some(1.5));
    }
}
