use serde::{Deserialize, Serialize};

use super::error::StatsError;

/// Per-stream scale factors consumed by the mixer.
///
/// Immutable once built. Has exactly one entry per stream in the mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleTable {
    scales: Vec<f32>,
}

impl ScaleTable {
    /// Wrap already-final scale factors without any adjustment.
    pub fn new(scales: Vec<f32>) -> Self {
        Self { scales }
    }

    /// Build a table from caller-supplied scales, applying the same clamp
    /// and output gain the auto-gain path applies.
    pub fn from_literal(scales: &[f32], max_gain: Option<f32>, output_gain: f32) -> Result<Self, StatsError> {
        if let Some(bad) = scales.iter().find(|s| !s.is_finite()) {
            return Err(StatsError::InvalidConfiguration(format!("scale factor is not finite: {}", bad)));
        }
        let scales = scales
            .iter()
            .map(|&s| finish_scale(s, max_gain, output_gain))
            .collect();
        Ok(Self { scales })
    }

    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.scales.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}

/// Clamp to `max_gain` (ignored unless positive), then apply the output gain.
pub(crate) fn finish_scale(scale: f32, max_gain: Option<f32>, output_gain: f32) -> f32 {
    let clamped = match max_gain {
        Some(max) if max > 0.0 && scale > max => max,
        _ => scale,
    };
    clamped * output_gain
}
