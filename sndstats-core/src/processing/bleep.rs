use rand::Rng;

use crate::models::config::RandomSampling;
use crate::models::error::StatsError;
use crate::processing::accumulator::StatsAccumulator;
use crate::processing::sampling::sample_random;
use crate::traits::sample_source::SampleSource;

/// Sampling budget used to estimate a bleep tone's amplitude: 5 minutes in 10 second blocks.
pub const BLEEP_SAMPLING: RandomSampling = RandomSampling {
    total_secs: 300.0,
    block_secs: 10.0,
};

/// Estimate the amplitude of a tone that replaces bleeped regions of `source`.
///
/// The amplitude is `mean + std` of a random sample of the signal, so the
/// tone sits at roughly the loudness of the surrounding audio. The stream is
/// rewound to frame 0 afterwards.
pub fn estimate_bleep_amplitude<S, R>(source: &mut S, sampling: &RandomSampling, rng: &mut R) -> Result<f32, StatsError>
where
    S: SampleSource + ?Sized,
    R: Rng + ?Sized,
{
    let info = source.info();
    info.ensure_mono()?;

    let mut acc = StatsAccumulator::new();
    let frames = sample_random(source, sampling, rng, &mut acc)?;
    source.rewind()?;

    let amplitude = acc.mean()? + acc.std()?;
    log::debug!("bleep amplitude {} from {} sampled frames", amplitude, frames);
    Ok(amplitude as f32)
}
