//! Strategies that feed a stream's samples into a `StatsAccumulator`.
//!
//! - Bounded linear scan: read from an optional skip point until the end of
//!   the stream or until an approximate stop time has been passed.
//! - Randomized block sampling: read fixed-length blocks at uniformly drawn
//!   offsets until a total time budget is met. Cheap on very long files, but
//!   it assumes the signal is roughly stationary and may read up to one
//!   block more than the budget.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::config::{RandomSampling, SamplingConfiguration, ScanWindow};
use crate::models::error::StatsError;
use crate::processing::accumulator::StatsAccumulator;
use crate::processing::block::{alloc_block, block_len};
use crate::traits::sample_source::SampleSource;

/// Offset generator seeded from the wall clock, for production use.
///
/// Tests should build their own with `StdRng::seed_from_u64`.
pub fn time_seeded_rng() -> StdRng {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    StdRng::seed_from_u64(seed)
}

/// Accumulate every sample inside `window`, reading `block_size` frames at a time.
///
/// The stop bound is checked after each block, so the last block may run past
/// it. A stop bound of zero frames reads to the end. Returns the number of
/// frames accumulated.
pub fn scan_linear<S: SampleSource + ?Sized>(
    source: &mut S,
    window: &ScanWindow,
    block_size: usize,
    acc: &mut StatsAccumulator,
) -> Result<u64, StatsError> {
    window.validate()?;
    if block_size == 0 {
        return Err(StatsError::InvalidConfiguration("block size must be positive".into()));
    }

    let info = source.info();
    let skip_frames = info.secs_to_frames(window.skip_secs);
    let stop_frame = window
        .stop_secs
        .map(|secs| info.secs_to_frames(secs))
        .filter(|&frame| frame > 0);

    let mut position = 0u64;
    if skip_frames > 0 {
        info.ensure_seekable()?;
        source.seek(skip_frames)?;
        position = skip_frames;
    }

    let mut buf = alloc_block(block_size)?;
    let mut frames_read = 0u64;
    loop {
        let n = source.read(&mut buf)?;
        if n == 0 {
            break;
        }
        acc.accumulate_slice(&buf[..n]);
        position += n as u64;
        frames_read += n as u64;
        if stop_frame.is_some_and(|stop| position >= stop) {
            break;
        }
    }
    Ok(frames_read)
}

/// Accumulate randomly placed blocks until `sampling.total_secs` worth of frames has been read.
///
/// Each block starts at an offset drawn uniformly from `[0, frames)` and is
/// shorter only when it hits the end of the stream. Returns the number of
/// frames accumulated, which is at least the budget and less than the budget
/// plus one block.
pub fn sample_random<S, R>(
    source: &mut S,
    sampling: &RandomSampling,
    rng: &mut R,
    acc: &mut StatsAccumulator,
) -> Result<u64, StatsError>
where
    S: SampleSource + ?Sized,
    R: Rng + ?Sized,
{
    sampling.validate()?;
    let info = source.info();
    info.ensure_seekable()?;
    if info.frames == 0 {
        return Err(StatsError::insufficient(1, 0));
    }

    let target = info.secs_to_frames(sampling.total_secs).max(1);
    let block_frames = info.secs_to_frames(sampling.block_secs).max(1);
    let mut buf = alloc_block(block_len(block_frames)?)?;

    let mut frames_read = 0u64;
    while frames_read < target {
        let offset = rng.random_range(0..info.frames);
        source.seek(offset)?;
        let n = source.read(&mut buf)?;
        if n == 0 {
            return Err(StatsError::ReadFailure(format!(
                "no frames available at offset {} of {}",
                offset, info.frames
            )));
        }
        acc.accumulate_slice(&buf[..n]);
        frames_read += n as u64;
    }
    Ok(frames_read)
}

/// Run one statistics pass over every stream in `sources`, pooling all samples.
///
/// All streams are checked up front: each must be single-channel, and
/// seekable when the configured mode seeks.
pub fn collect_statistics<S, R>(
    sources: &mut [S],
    config: &SamplingConfiguration,
    rng: &mut R,
) -> Result<StatsAccumulator, StatsError>
where
    S: SampleSource,
    R: Rng + ?Sized,
{
    config.validate()?;
    for source in sources.iter() {
        let info = source.info();
        info.ensure_mono()?;
        if config.requires_seek() {
            info.ensure_seekable()?;
        }
    }

    let mut acc = StatsAccumulator::new();
    for (index, source) in sources.iter_mut().enumerate() {
        let frames = match &config.random {
            Some(random) => sample_random(source, random, rng, &mut acc)?,
            None => scan_linear(source, &config.window, config.block_size, &mut acc)?,
        };
        log::debug!("stream {}: accumulated {} frames", index, frames);
    }
    Ok(acc)
}
