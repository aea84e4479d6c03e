use sha2::{Digest, Sha256};

use crate::models::config::MixConfiguration;
use crate::models::error::StatsError;
use crate::models::mix_result::MixSummary;
use crate::models::scale_table::ScaleTable;
use crate::processing::block::alloc_block;
use crate::traits::sample_source::{SampleSink, SampleSource};

/// Sums independently scaled mono streams into one output stream.
///
/// Streams are left-justified: they all start at frame 0, and a stream that
/// runs out simply stops contributing. The output is as long as the longest
/// input.
#[derive(Debug, Clone)]
pub struct Mixer {
    pub config: MixConfiguration,
}

impl Mixer {
    pub fn new(config: MixConfiguration) -> Self {
        Self { config }
    }

    /// Mix `sources` into `sink`, scaling stream `i` by `scales[i]`.
    ///
    /// Every stream is read from its current position, which should be the
    /// first frame. Does not call `sink.finish()`.
    pub fn mix<S, W>(&self, sources: &mut [S], scales: &ScaleTable, sink: &mut W) -> Result<MixSummary, StatsError>
    where
        S: SampleSource,
        W: SampleSink + ?Sized,
    {
        self.config.validate()?;
        if sources.len() != scales.len() {
            return Err(StatsError::InvalidConfiguration(format!(
                "{} streams but {} scale factors",
                sources.len(),
                scales.len()
            )));
        }
        for source in sources.iter() {
            source.info().ensure_mono()?;
        }

        let block_size = self.config.block_size;
        let mut input = alloc_block(block_size)?;
        let mut output = alloc_block(block_size)?;
        let mut hasher = Sha256::new();
        let mut frames_written = 0u64;
        let mut blocks_written = 0u64;

        log::info!("mixing {} streams", sources.len());
        loop {
            output.fill(0.0);
            let mut max_nread = 0usize;
            for (source, &scale) in sources.iter_mut().zip(scales.scales()) {
                let nread = source.read(&mut input)?;
                for (out, &sample) in output[..nread].iter_mut().zip(&input[..nread]) {
                    *out += sample * scale;
                }
                max_nread = max_nread.max(nread);
            }
            if max_nread == 0 {
                break;
            }

            let block = &output[..max_nread];
            if let Err(e) = sink.write(block) {
                log::error!("failed to write mixed block at frame {}: {}", frames_written, e);
                return Err(e);
            }
            for sample in block {
                hasher.update(sample.to_le_bytes());
            }
            frames_written += max_nread as u64;
            blocks_written += 1;
        }
        log::info!("mix finished: {} frames in {} blocks", frames_written, blocks_written);

        Ok(MixSummary {
            frames_written,
            blocks_written,
            checksum: hex_encode(&hasher.finalize()),
        })
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new(MixConfiguration::default())
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
