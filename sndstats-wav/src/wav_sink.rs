//! WAV file sample sink.
//!
//! Writes mono samples in either integer or float PCM. Integer output uses
//! the same `2^(bits - 1)` scale as `WavFileSource`, rounds to the nearest
//! step and clips at full scale, so an unscaled copy reproduces its input.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};

use sndstats_core::models::error::StatsError;
use sndstats_core::traits::sample_source::SampleSink;

use crate::wav_source::WavFileSource;

/// A mono WAV file opened for writing.
///
/// The header is finalized by `finish()`, or on drop if `finish()` was never
/// called (errors are then lost).
pub struct WavFileSink {
    path: PathBuf,
    writer: Option<WavWriter<BufWriter<File>>>,
    spec: WavSpec,
    int_scale: f64,
    frames_written: u64,
}

impl WavFileSink {
    /// Create `path` with the given format. Only single-channel specs are accepted.
    pub fn create(path: impl AsRef<Path>, spec: WavSpec) -> Result<Self, StatsError> {
        let path = path.as_ref().to_path_buf();
        if spec.channels != 1 {
            return Err(StatsError::ChannelCountUnsupported(spec.channels));
        }
        let writer = WavWriter::create(&path, spec)
            .map_err(|e| StatsError::CannotOpen(format!("{}: {}", path.display(), e)))?;
        let int_scale = (1u64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f64;

        Ok(Self {
            path,
            writer: Some(writer),
            spec,
            int_scale,
            frames_written: 0,
        })
    }

    /// Create `path` in the same format as `source`.
    pub fn like(path: impl AsRef<Path>, source: &WavFileSource) -> Result<Self, StatsError> {
        Self::create(path, source.spec())
    }

    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

impl SampleSink for WavFileSink {
    fn write(&mut self, samples: &[f32]) -> Result<(), StatsError> {
        let path = &self.path;
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| StatsError::WriteFailure(format!("{}: file is already finalized", path.display())))?;
        let write_error = |e: hound::Error| StatsError::WriteFailure(format!("{}: {}", path.display(), e));

        match self.spec.sample_format {
            SampleFormat::Float => {
                for &s in samples {
                    writer.write_sample(s).map_err(write_error)?;
                }
            }
            SampleFormat::Int => {
                let scale = self.int_scale;
                for &s in samples {
                    let value = (s as f64 * scale).round().clamp(-scale, scale - 1.0) as i32;
                    writer.write_sample(value).map_err(write_error)?;
                }
            }
        }
        self.frames_written += samples.len() as u64;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), StatsError> {
        let Some(writer) = self.writer.take() else {
            return Ok(());
        };
        writer
            .finalize()
            .map_err(|e| StatsError::WriteFailure(format!("{}: {}", self.path.display(), e)))?;
        log::debug!("finalized {} ({} frames)", self.path.display(), self.frames_written);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sndstats_core::traits::sample_source::SampleSource;

    use super::*;

    fn temp_file_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sndstats_wav_sink_{}_{}.wav", name, std::process::id()))
    }

    fn int16_spec() -> WavSpec {
        WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    #[test]
    fn int16_output_clips_out_of_range_samples() {
        let path = temp_file_path("clip");
        let mut sink = WavFileSink::create(&path, int16_spec()).unwrap();
        sink.write(&[0.0, 1.0, -1.0, 2.0, -3.0]).unwrap();
        sink.finish().unwrap();
        assert_eq!(sink.frames_written(), 5);

        let mut reader = hound::WavReader::open(&path).unwrap();
        let values: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(values, vec![0, i16::MAX, i16::MIN, i16::MAX, i16::MIN]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn int16_output_rounds_to_nearest_step() {
        let path = temp_file_path("round");
        let mut sink = WavFileSink::create(&path, int16_spec()).unwrap();
        let lsb = 1.0 / 32768.0;
        sink.write(&[lsb, -lsb, 0.6 * lsb, -0.4 * lsb, 0.5]).unwrap();
        sink.finish().unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let values: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(values, vec![1, -1, 1, 0, 16384]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn float_output_round_trips_through_source() {
        let path = temp_file_path("float");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut sink = WavFileSink::create(&path, spec).unwrap();
        sink.write(&[0.25, -1.5]).unwrap();
        sink.finish().unwrap();

        let mut source = WavFileSource::open(&path).unwrap();
        assert_eq!(source.info().sample_rate, 22050);
        let mut buf = [0.0f32; 4];
        assert_eq!(source.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[0.25, -1.5]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn stereo_spec_is_rejected() {
        let spec = WavSpec {
            channels: 2,
            ..int16_spec()
        };
        assert!(matches!(
            WavFileSink::create(temp_file_path("stereo"), spec),
            Err(StatsError::ChannelCountUnsupported(2))
        ));
    }

    #[test]
    fn write_after_finish_fails() {
        let path = temp_file_path("finished");
        let mut sink = WavFileSink::create(&path, int16_spec()).unwrap();
        sink.finish().unwrap();
        assert!(matches!(sink.write(&[0.1]), Err(StatsError::WriteFailure(_))));
        assert!(sink.finish().is_ok());

        std::fs::remove_file(&path).ok();
    }
}
