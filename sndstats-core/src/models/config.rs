use serde::{Deserialize, Serialize};

use super::error::StatsError;

/// Frames per read during a bounded linear scan.
pub const DEFAULT_SCAN_BLOCK_SIZE: usize = 10_000;

/// Frames per mixing iteration.
pub const DEFAULT_MIX_BLOCK_SIZE: usize = 8192;

/// Frames per comparison block when diffing two streams.
pub const DEFAULT_DIFF_BLOCK_SIZE: usize = 4096;

/// Default absolute difference reported by the stream differ.
pub const DEFAULT_DIFF_THRESHOLD: f32 = 0.02;

/// Window for a bounded linear scan.
///
/// `stop_secs` is a lower bound on where reading stops: the block that
/// crosses it is still read in full.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanWindow {
    /// Seconds skipped at the start of the stream (requires a seekable stream when > 0).
    pub skip_secs: f64,

    /// Approximate stop time in seconds (None = read to end).
    pub stop_secs: Option<f64>,
}

impl ScanWindow {
    /// Build a window from raw skip/stop times. A negative stop time means "to end".
    pub fn new(skip_secs: f64, stop_secs: f64) -> Self {
        Self {
            skip_secs,
            stop_secs: (stop_secs >= 0.0).then_some(stop_secs),
        }
    }

    /// Whether this window restricts the scan at all.
    pub fn is_bounded(&self) -> bool {
        self.skip_secs > 0.0 || self.stop_secs.is_some_and(|s| s > 0.0)
    }

    pub fn validate(&self) -> Result<(), StatsError> {
        if !self.skip_secs.is_finite() || self.skip_secs < 0.0 {
            return Err(StatsError::InvalidConfiguration(format!(
                "skip time must be a non-negative number, got {}",
                self.skip_secs
            )));
        }
        if let Some(stop) = self.stop_secs {
            if !stop.is_finite() {
                return Err(StatsError::InvalidConfiguration(format!("stop time is not finite: {}", stop)));
            }
        }
        Ok(())
    }
}

impl Default for ScanWindow {
    fn default() -> Self {
        Self {
            skip_secs: 0.0,
            stop_secs: None,
        }
    }
}

/// Budget for randomized block sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomSampling {
    /// Total seconds of audio to read across all blocks.
    pub total_secs: f64,

    /// Length in seconds of each contiguous block.
    pub block_secs: f64,
}

impl RandomSampling {
    pub fn new(total_secs: f64, block_secs: f64) -> Self {
        Self { total_secs, block_secs }
    }

    pub fn validate(&self) -> Result<(), StatsError> {
        if !(self.total_secs.is_finite() && self.total_secs > 0.0) {
            return Err(StatsError::InvalidConfiguration(format!(
                "random sample time must be positive, got {}",
                self.total_secs
            )));
        }
        if !(self.block_secs.is_finite() && self.block_secs > 0.0) {
            return Err(StatsError::InvalidConfiguration(format!(
                "random sample block size must be positive, got {}",
                self.block_secs
            )));
        }
        Ok(())
    }
}

impl Default for RandomSampling {
    fn default() -> Self {
        Self {
            total_secs: 300.0,
            block_secs: 1.0,
        }
    }
}

/// Configuration for a plain statistics run over one or more streams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfiguration {
    /// Linear scan window. Ignored when `random` is set, and must then be unbounded.
    pub window: ScanWindow,

    /// Random block sampling budget (None = bounded linear scan).
    pub random: Option<RandomSampling>,

    /// Frames per read for the linear scan.
    pub block_size: usize,
}

impl SamplingConfiguration {
    pub fn linear(window: ScanWindow) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    pub fn random(random: RandomSampling) -> Self {
        Self {
            random: Some(random),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), StatsError> {
        self.window.validate()?;
        if let Some(random) = &self.random {
            if self.window.is_bounded() {
                return Err(StatsError::ConflictingSampleMode);
            }
            random.validate()?;
        }
        if self.block_size == 0 {
            return Err(StatsError::InvalidConfiguration("block size must be positive".into()));
        }
        Ok(())
    }

    /// Whether the configured mode needs to seek.
    pub fn requires_seek(&self) -> bool {
        self.random.is_some() || self.window.skip_secs > 0.0
    }
}

impl Default for SamplingConfiguration {
    fn default() -> Self {
        Self {
            window: ScanWindow::default(),
            random: None,
            block_size: DEFAULT_SCAN_BLOCK_SIZE,
        }
    }
}

/// Configuration for deriving per-stream scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoGainConfiguration {
    /// Streams shorter than this (seconds) are scanned in full; longer ones are sampled.
    pub linear_threshold_secs: f64,

    /// Sampling budget for streams at or above the threshold.
    pub random: RandomSampling,

    /// Upper bound for any single scale before the output gain (None = unbounded).
    pub max_gain: Option<f32>,

    /// Gain applied to every scale after normalization and clamping.
    pub output_gain: f32,

    /// Frames per read for linear scans.
    pub block_size: usize,
}

impl AutoGainConfiguration {
    /// The effective clamp: zero or negative limits mean "no clamp".
    pub fn effective_max_gain(&self) -> Option<f32> {
        self.max_gain.filter(|g| *g > 0.0)
    }

    pub fn validate(&self) -> Result<(), StatsError> {
        if !(self.linear_threshold_secs.is_finite() && self.linear_threshold_secs >= 0.0) {
            return Err(StatsError::InvalidConfiguration(format!(
                "linear scan threshold must be non-negative, got {}",
                self.linear_threshold_secs
            )));
        }
        self.random.validate()?;
        if !self.output_gain.is_finite() {
            return Err(StatsError::InvalidConfiguration(format!(
                "output gain is not finite: {}",
                self.output_gain
            )));
        }
        if self.block_size == 0 {
            return Err(StatsError::InvalidConfiguration("block size must be positive".into()));
        }
        Ok(())
    }
}

impl Default for AutoGainConfiguration {
    fn default() -> Self {
        Self {
            linear_threshold_secs: 300.0,
            random: RandomSampling::new(300.0, 2.0),
            max_gain: None,
            output_gain: 1.0,
            block_size: DEFAULT_SCAN_BLOCK_SIZE,
        }
    }
}

/// Configuration for the mixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixConfiguration {
    /// Frames read from each stream per iteration.
    pub block_size: usize,
}

impl MixConfiguration {
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.block_size == 0 {
            return Err(StatsError::InvalidConfiguration("mix block size must be positive".into()));
        }
        Ok(())
    }
}

impl Default for MixConfiguration {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_MIX_BLOCK_SIZE,
        }
    }
}
