use rand::Rng;

use crate::models::config::{AutoGainConfiguration, MixConfiguration};
use crate::models::error::StatsError;
use crate::models::mix_result::{MixMetadata, MixSummary};
use crate::models::scale_table::ScaleTable;
use crate::processing::auto_gain::auto_gain;
use crate::processing::mixer::Mixer;
use crate::traits::sample_source::{SampleSink, SampleSource};

/// Where a mix gets its scale factors from.
#[derive(Debug, Clone, PartialEq)]
pub enum GainMode {
    /// One caller-supplied scale per stream.
    Literal(Vec<f32>),
    /// Derive scales from each stream's standard deviation.
    Auto,
}

/// Result of a completed mix session.
#[derive(Debug, Clone, PartialEq)]
pub struct MixOutcome {
    pub scales: ScaleTable,
    pub summary: MixSummary,
    /// Provenance record for the output, ready for `storage::metadata::write_metadata`.
    pub metadata: MixMetadata,
}

/// End-to-end mix: scale factors, then mixing, then finalizing the sink.
///
/// `gain.max_gain` and `gain.output_gain` apply to literal scales too. The
/// output is described at the first input's sample rate.
#[derive(Debug, Clone, Default)]
pub struct MixSession {
    pub gain: AutoGainConfiguration,
    pub mix: MixConfiguration,
}

impl MixSession {
    pub fn new(gain: AutoGainConfiguration, mix: MixConfiguration) -> Self {
        Self { gain, mix }
    }

    pub fn run<S, W, R>(
        &self,
        sources: &mut [S],
        mode: &GainMode,
        sink: &mut W,
        rng: &mut R,
    ) -> Result<MixOutcome, StatsError>
    where
        S: SampleSource,
        W: SampleSink + ?Sized,
        R: Rng + ?Sized,
    {
        self.gain.validate()?;
        self.mix.validate()?;
        for source in sources.iter() {
            source.info().ensure_mono()?;
        }

        let scales = match mode {
            GainMode::Auto => {
                log::info!("computing auto-gain for {} streams", sources.len());
                auto_gain(sources, &self.gain, rng)?
            }
            GainMode::Literal(literal) => {
                if literal.len() != sources.len() {
                    return Err(StatsError::InvalidConfiguration(format!(
                        "{} streams but {} scale factors",
                        sources.len(),
                        literal.len()
                    )));
                }
                ScaleTable::from_literal(literal, self.gain.effective_max_gain(), self.gain.output_gain)?
            }
        };

        let inputs: Vec<String> = sources
            .iter()
            .enumerate()
            .map(|(i, source)| source.label().unwrap_or_else(|| format!("stream {}", i)))
            .collect();
        let sample_rate = sources.first().map_or(0, |source| source.info().sample_rate);

        let summary = Mixer::new(self.mix).mix(sources, &scales, sink)?;
        sink.finish()?;

        let metadata = MixMetadata::new(inputs, &scales, matches!(mode, GainMode::Auto), sample_rate, &summary);
        Ok(MixOutcome {
            scales,
            summary,
            metadata,
        })
    }
}
