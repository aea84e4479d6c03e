use serde::{Deserialize, Serialize};

use crate::models::config::{DEFAULT_DIFF_BLOCK_SIZE, DEFAULT_DIFF_THRESHOLD};
use crate::models::error::StatsError;
use crate::processing::block::alloc_block;
use crate::traits::sample_source::SampleSource;

/// One frame at which two streams differ by at least the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleDifference {
    pub frame: u64,
    pub left: f32,
    pub right: f32,
    /// `left - right`.
    pub diff: f32,
}

/// Outcome of comparing two streams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffReport {
    pub differences: Vec<SampleDifference>,
    /// Set when a block read returned different lengths from the two streams.
    pub length_mismatch: bool,
    /// Frames compared pairwise.
    pub frames_compared: u64,
}

impl DiffReport {
    /// Whether the streams differ at all, by content or by length.
    pub fn is_different(&self) -> bool {
        self.length_mismatch || !self.differences.is_empty()
    }
}

/// Options for `diff_streams`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Smallest absolute difference that is reported.
    pub threshold: f32,
    pub block_size: usize,
    /// Return as soon as the first difference is found.
    pub stop_at_first: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DIFF_THRESHOLD,
            block_size: DEFAULT_DIFF_BLOCK_SIZE,
            stop_at_first: false,
        }
    }
}

/// Compare two mono streams frame by frame from their current positions.
///
/// Comparison ends after the first block in which either stream comes back
/// short; only the overlapping frames of that block are compared.
pub fn diff_streams<A, B>(left: &mut A, right: &mut B, options: &DiffOptions) -> Result<DiffReport, StatsError>
where
    A: SampleSource + ?Sized,
    B: SampleSource + ?Sized,
{
    if options.block_size == 0 {
        return Err(StatsError::InvalidConfiguration("diff block size must be positive".into()));
    }
    left.info().ensure_mono()?;
    right.info().ensure_mono()?;

    let mut left_buf = alloc_block(options.block_size)?;
    let mut right_buf = alloc_block(options.block_size)?;
    let mut report = DiffReport::default();

    loop {
        let n_left = left.read(&mut left_buf)?;
        let n_right = right.read(&mut right_buf)?;
        if n_left != n_right && !report.length_mismatch {
            log::warn!("stream lengths appear to differ near frame {}", report.frames_compared);
            report.length_mismatch = true;
        }

        let n = n_left.min(n_right);
        for (i, (&l, &r)) in left_buf[..n].iter().zip(&right_buf[..n]).enumerate() {
            let diff = l - r;
            if diff.abs() >= options.threshold {
                report.differences.push(SampleDifference {
                    frame: report.frames_compared + i as u64,
                    left: l,
                    right: r,
                    diff,
                });
                if options.stop_at_first {
                    report.frames_compared += i as u64 + 1;
                    return Ok(report);
                }
            }
        }
        report.frames_compared += n as u64;

        if n_left < options.block_size || n_right < options.block_size {
            break;
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemorySource;

    fn options(block_size: usize) -> DiffOptions {
        DiffOptions {
            block_size,
            ..DiffOptions::default()
        }
    }

    #[test]
    fn identical_streams_have_no_differences() {
        let samples: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        let mut a = MemorySource::new(samples.clone(), 8000);
        let mut b = MemorySource::new(samples, 8000);

        let report = diff_streams(&mut a, &mut b, &options(16)).unwrap();

        assert!(!report.is_different());
        assert_eq!(report.frames_compared, 100);
    }

    #[test]
    fn differences_above_threshold_are_reported_with_frame() {
        let mut a = MemorySource::new(vec![0.0, 0.5, 0.0, 0.0, 0.0], 8000);
        let mut b = MemorySource::new(vec![0.0, 0.5, 0.01, 0.0, -0.25], 8000);

        let report = diff_streams(&mut a, &mut b, &options(2)).unwrap();

        assert_eq!(report.differences.len(), 1);
        let d = report.differences[0];
        assert_eq!(d.frame, 4);
        assert_eq!(d.left, 0.0);
        assert_eq!(d.right, -0.25);
        assert_eq!(d.diff, 0.25);
        assert!(!report.length_mismatch);
    }

    #[test]
    fn length_mismatch_is_flagged() {
        let mut a = MemorySource::new(vec![0.0; 10], 8000);
        let mut b = MemorySource::new(vec![0.0; 7], 8000);

        let report = diff_streams(&mut a, &mut b, &options(4)).unwrap();

        assert!(report.length_mismatch);
        assert!(report.differences.is_empty());
        assert_eq!(report.frames_compared, 7);
    }

    #[test]
    fn stop_at_first_returns_early() {
        let mut a = MemorySource::new(vec![1.0; 50], 8000);
        let mut b = MemorySource::new(vec![0.0; 50], 8000);
        let opts = DiffOptions {
            stop_at_first: true,
            ..options(8)
        };

        let report = diff_streams(&mut a, &mut b, &opts).unwrap();

        assert_eq!(report.differences.len(), 1);
        assert_eq!(report.differences[0].frame, 0);
        assert_eq!(a.position(), 8);
    }
}
