use std::path::Path;

use rand::Rng;

use sndstats_core::models::error::StatsError;
use sndstats_core::session::mix_session::{GainMode, MixOutcome, MixSession};
use sndstats_core::storage::metadata::write_metadata;

use crate::wav_sink::WavFileSink;
use crate::wav_source::WavFileSource;

/// Mix mono WAV files into `output` and write its `.metadata.json` sidecar.
///
/// The output takes the format of the first input. Every input is opened and
/// checked before the output file is created.
pub fn mix_files<P, R>(
    session: &MixSession,
    inputs: &[P],
    output: &Path,
    mode: &GainMode,
    rng: &mut R,
) -> Result<MixOutcome, StatsError>
where
    P: AsRef<Path>,
    R: Rng + ?Sized,
{
    let mut sources = inputs
        .iter()
        .map(WavFileSource::open_mono)
        .collect::<Result<Vec<_>, _>>()?;
    let Some(first) = sources.first() else {
        return Err(StatsError::InvalidConfiguration("nothing to mix".into()));
    };
    let mut sink = WavFileSink::like(output, first)?;

    log::info!("mixing {} files into {}", sources.len(), output.display());
    let outcome = session.run(&mut sources, mode, &mut sink, rng)?;
    write_metadata(&outcome.metadata, output)?;
    Ok(outcome)
}
