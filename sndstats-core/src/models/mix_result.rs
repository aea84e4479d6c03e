use serde::{Deserialize, Serialize};

use super::scale_table::ScaleTable;

/// Result returned when a mix completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixSummary {
    /// Frames written to the sink (length of the longest input).
    pub frames_written: u64,
    /// Number of write calls issued to the sink.
    pub blocks_written: u64,
    /// Hex SHA-256 of the written samples as little-endian f32 bytes.
    pub checksum: String,
}

/// Metadata stored alongside a mixed output.
///
/// Built by `MixSession::run`; serializable for the JSON sidecar written by
/// `storage::metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixMetadata {
    pub id: String,
    pub created_at: String,
    pub inputs: Vec<String>,
    pub scales: Vec<f32>,
    pub auto_gain: bool,
    pub sample_rate: u32,
    pub frames: u64,
    pub duration_secs: f64,
    pub checksum: String,
}

impl MixMetadata {
    /// Describe a finished mix of `inputs` at `sample_rate`.
    pub fn new(inputs: Vec<String>, scales: &ScaleTable, auto_gain: bool, sample_rate: u32, summary: &MixSummary) -> Self {
        let duration_secs = if sample_rate > 0 {
            summary.frames_written as f64 / sample_rate as f64
        } else {
            0.0
        };
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            inputs,
            scales: scales.scales().to_vec(),
            auto_gain,
            sample_rate,
            frames: summary.frames_written,
            duration_secs,
            checksum: summary.checksum.clone(),
        }
    }
}
