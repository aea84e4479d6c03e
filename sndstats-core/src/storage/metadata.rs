use std::fs;
use std::path::{Path, PathBuf};

use crate::models::error::StatsError;
use crate::models::mix_result::MixMetadata;

/// Path of the JSON sidecar for a mixed output: `{output}.metadata.json`.
pub fn metadata_path(output_path: &Path) -> PathBuf {
    output_path.with_extension("metadata.json")
}

/// Write mix metadata as a JSON sidecar file next to the output.
pub fn write_metadata(metadata: &MixMetadata, output_path: &Path) -> Result<(), StatsError> {
    let json = serde_json::to_string_pretty(metadata)
        .map_err(|e| StatsError::StorageError(format!("failed to serialize metadata: {}", e)))?;
    fs::write(metadata_path(output_path), json)
        .map_err(|e| StatsError::StorageError(format!("failed to write metadata: {}", e)))?;
    Ok(())
}

/// Read mix metadata from the JSON sidecar of `output_path`.
pub fn read_metadata(output_path: &Path) -> Result<MixMetadata, StatsError> {
    let json = fs::read_to_string(metadata_path(output_path))
        .map_err(|e| StatsError::StorageError(format!("failed to read metadata: {}", e)))?;
    serde_json::from_str(&json).map_err(|e| StatsError::StorageError(format!("failed to parse metadata: {}", e)))
}
