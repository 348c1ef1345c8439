// Persisted session log record
use serde::Deserialize;

/// One persisted sample, the stored analogue of a snapshot. The `p{1,2,3}`
/// columns are the three phases. Immutable once fetched; the server returns
/// records ordered by timestamp ascending and the client never re-sorts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogRecord {
    pub timestamp: f64,
    #[serde(default)]
    pub p1_v: Option<f64>,
    #[serde(default)]
    pub p1_i: Option<f64>,
    #[serde(default)]
    pub p1_p: Option<f64>,
    #[serde(default)]
    pub p2_v: Option<f64>,
    #[serde(default)]
    pub p2_i: Option<f64>,
    #[serde(default)]
    pub p2_p: Option<f64>,
    #[serde(default)]
    pub p3_v: Option<f64>,
    #[serde(default)]
    pub p3_i: Option<f64>,
    #[serde(default)]
    pub p3_p: Option<f64>,
    #[serde(default)]
    pub neutral_i: Option<f64>,
}

impl LogRecord {
    /// Sum of the phase powers that were recorded; absent phases count as 0.
    pub fn total_power(&self) -> f64 {
        [self.p1_p, self.p2_p, self.p3_p].into_iter().flatten().sum()
    }
}
