//! Automatic gain equalization across streams.
//!
//! Each stream's loudness is estimated by its standard deviation. The
//! loudest stream keeps a scale of 1.0 and every quieter stream is boosted
//! to match it, optionally capped by `max_gain`. The output gain is applied
//! last, which is the same as scaling the mixed signal.

use rand::Rng;

use crate::models::config::{AutoGainConfiguration, ScanWindow};
use crate::models::error::StatsError;
use crate::models::scale_table::{finish_scale, ScaleTable};
use crate::processing::accumulator::StatsAccumulator;
use crate::processing::sampling::{sample_random, scan_linear};
use crate::traits::sample_source::SampleSource;

/// Estimate a stream's standard deviation and rewind it to frame 0.
///
/// Streams shorter than `linear_threshold_secs` are read in full; longer
/// ones are estimated by random block sampling.
pub fn estimate_std<S, R>(source: &mut S, config: &AutoGainConfiguration, rng: &mut R) -> Result<f64, StatsError>
where
    S: SampleSource + ?Sized,
    R: Rng + ?Sized,
{
    let info = source.info();
    let mut acc = StatsAccumulator::new();
    if info.duration_secs() < config.linear_threshold_secs {
        scan_linear(source, &ScanWindow::default(), config.block_size, &mut acc)?;
    } else {
        sample_random(source, &config.random, rng, &mut acc)?;
    }
    source.rewind()?;
    acc.std()
}

/// Turn per-stream standard deviations into final scale factors.
///
/// A zero or non-finite deviation has no meaningful inverse and fails with
/// `DegenerateSignal` naming the stream.
pub fn compute_scales(stds: &[f64], max_gain: Option<f32>, output_gain: f32) -> Result<ScaleTable, StatsError> {
    if stds.is_empty() {
        return Err(StatsError::InvalidConfiguration("auto-gain needs at least one stream".into()));
    }

    let mut raw = Vec::with_capacity(stds.len());
    for (stream, &std) in stds.iter().enumerate() {
        if !(std.is_finite() && std > 0.0) {
            return Err(StatsError::DegenerateSignal { stream });
        }
        raw.push(1.0 / std);
    }

    let normalizer = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let scales = raw
        .iter()
        .map(|r| finish_scale((r / normalizer) as f32, max_gain, output_gain))
        .collect();
    Ok(ScaleTable::new(scales))
}

/// Derive a scale table for `sources` and leave every stream at frame 0.
///
/// Every stream must be single-channel and seekable; this is checked for
/// all of them before any samples are read.
pub fn auto_gain<S, R>(sources: &mut [S], config: &AutoGainConfiguration, rng: &mut R) -> Result<ScaleTable, StatsError>
where
    S: SampleSource,
    R: Rng + ?Sized,
{
    config.validate()?;
    if sources.is_empty() {
        return Err(StatsError::InvalidConfiguration("auto-gain needs at least one stream".into()));
    }
    for source in sources.iter() {
        let info = source.info();
        info.ensure_mono()?;
        info.ensure_seekable()?;
    }

    let mut stds = Vec::with_capacity(sources.len());
    for (index, source) in sources.iter_mut().enumerate() {
        let std = estimate_std(source, config, rng)?;
        log::debug!("stream {}: std = {}", index, std);
        stds.push(std);
    }

    let table = compute_scales(&stds, config.effective_max_gain(), config.output_gain)?;
    for (index, scale) in table.scales().iter().enumerate() {
        log::debug!("scale[{}] = {}", index, scale);
    }
    Ok(table)
}
