//! WAV file sample source.
//!
//! Integer PCM is normalized to `[-1.0, 1.0)` by `2^(bits - 1)`; float PCM is
//! passed through unchanged.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec};

use sndstats_core::models::error::StatsError;
use sndstats_core::models::stream_info::StreamInfo;
use sndstats_core::traits::sample_source::SampleSource;

/// A WAV file opened for reading. Always seekable.
pub struct WavFileSource {
    path: PathBuf,
    reader: WavReader<BufReader<File>>,
    spec: WavSpec,
    frames: u64,
    int_scale: f32,
}

impl WavFileSource {
    /// Open `path` as a WAV file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let path = path.as_ref().to_path_buf();
        let reader = WavReader::open(&path)
            .map_err(|e| StatsError::CannotOpen(format!("{}: {}", path.display(), e)))?;
        let spec = reader.spec();
        let frames = reader.duration() as u64;
        let int_scale = (1u64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;

        log::debug!(
            "opened {}: {} ch, {} Hz, {} bit {:?}, {} frames",
            path.display(),
            spec.channels,
            spec.sample_rate,
            spec.bits_per_sample,
            spec.sample_format,
            frames
        );

        Ok(Self {
            path,
            reader,
            spec,
            frames,
            int_scale,
        })
    }

    /// Open `path` and reject it unless it has exactly one channel.
    pub fn open_mono(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let source = Self::open(path)?;
        source.info().ensure_mono()?;
        Ok(source)
    }

    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_error(path: &Path, e: hound::Error) -> StatsError {
    StatsError::ReadFailure(format!("{}: {}", path.display(), e))
}

impl SampleSource for WavFileSource {
    fn info(&self) -> StreamInfo {
        StreamInfo {
            channels: self.spec.channels,
            sample_rate: self.spec.sample_rate,
            frames: self.frames,
            seekable: true,
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.path.display().to_string())
    }

    fn read(&mut self, buf: &mut [f32]) -> Result<usize, StatsError> {
        let path = &self.path;
        let mut n = 0;
        match self.spec.sample_format {
            SampleFormat::Float => {
                for (slot, sample) in buf.iter_mut().zip(self.reader.samples::<f32>()) {
                    *slot = sample.map_err(|e| read_error(path, e))?;
                    n += 1;
                }
            }
            SampleFormat::Int => {
                let scale = self.int_scale;
                for (slot, sample) in buf.iter_mut().zip(self.reader.samples::<i32>()) {
                    *slot = sample.map_err(|e| read_error(path, e))? as f32 / scale;
                    n += 1;
                }
            }
        }
        Ok(n)
    }

    fn seek(&mut self, frame: u64) -> Result<(), StatsError> {
        if frame > self.frames {
            return Err(StatsError::SeekFailure(format!(
                "{}: frame {} is past the end ({} frames)",
                self.path.display(),
                frame,
                self.frames
            )));
        }
        let frame = u32::try_from(frame)
            .map_err(|_| StatsError::SeekFailure(format!("frame {} out of range", frame)))?;
        self.reader
            .seek(frame)
            .map_err(|e| StatsError::SeekFailure(format!("{}: {}", self.path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use hound::WavWriter;

    use sndstats_core::models::config::ScanWindow;
    use sndstats_core::processing::accumulator::StatsAccumulator;
    use sndstats_core::processing::sampling::scan_linear;

    use super::*;

    fn temp_file_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sndstats_wav_source_{}_{}.wav", name, std::process::id()))
    }

    fn write_int16(path: &Path, channels: u16, samples: &[i16]) {
        let spec = WavSpec {
            channels,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn int16_samples_are_normalized() {
        let path = temp_file_path("int16");
        write_int16(&path, 1, &[0, 16384, -16384, -32768]);

        let mut source = WavFileSource::open(&path).unwrap();
        let info = source.info();
        assert_eq!(info.channels, 1);
        assert_eq!(info.sample_rate, 8000);
        assert_eq!(info.frames, 4);
        assert!(info.seekable);

        let mut buf = [0.0f32; 8];
        assert_eq!(source.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf[..4], &[0.0, 0.5, -0.5, -1.0]);
        assert_eq!(source.read(&mut buf).unwrap(), 0);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn float_samples_pass_through() {
        let path = temp_file_path("float");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for s in [0.125f32, -0.75, 0.5] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let mut source = WavFileSource::open(&path).unwrap();
        let mut buf = [0.0f32; 2];
        assert_eq!(source.read(&mut buf).unwrap(), 2);
        assert_eq!(buf, [0.125, -0.75]);
        assert_eq!(source.read(&mut buf).unwrap(), 1);
        assert_eq!(buf[0], 0.5);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn seek_then_scan() {
        let path = temp_file_path("seek");
        let samples: Vec<i16> = (0..8000).map(|i| if i < 4000 { 0 } else { 8192 }).collect();
        write_int16(&path, 1, &samples);

        let mut source = WavFileSource::open(&path).unwrap();
        let mut acc = StatsAccumulator::new();
        scan_linear(&mut source, &ScanWindow::new(0.5, -1.0), 1024, &mut acc).unwrap();

        assert_eq!(acc.count(), 4000);
        assert_relative_eq!(acc.mean().unwrap(), 0.25);
        assert_eq!(acc.std().unwrap(), 0.0);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn seek_past_end_fails() {
        let path = temp_file_path("seek_end");
        write_int16(&path, 1, &[1, 2, 3]);

        let mut source = WavFileSource::open(&path).unwrap();
        assert!(matches!(source.seek(10), Err(StatsError::SeekFailure(_))));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn stereo_file_is_rejected_by_open_mono() {
        let path = temp_file_path("stereo");
        write_int16(&path, 2, &[1, 2, 3, 4]);

        assert!(matches!(
            WavFileSource::open_mono(&path),
            Err(StatsError::ChannelCountUnsupported(2))
        ));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_cannot_be_opened() {
        let path = temp_file_path("does_not_exist");
        assert!(matches!(WavFileSource::open(&path), Err(StatsError::CannotOpen(_))));
    }
}
