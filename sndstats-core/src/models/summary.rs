use serde::{Deserialize, Serialize};

/// Snapshot of the moments of a statistics run.
///
/// Built from an accumulator holding at least two observations, so every
/// field is defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub count: u64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
    pub variance: f64,
    /// `1 / std`; infinite for a constant signal.
    pub inverse_std: f64,
}

