//! # sndstats-wav
//!
//! WAV file backend for sndstats, built on `hound`.
//!
//! Provides:
//! - `WavFileSource`: seekable reader yielding normalized `f32` samples
//! - `WavFileSink`: mono writer in the input's integer or float format
//! - `mix_files`: open, mix and describe a set of WAV files in one call
//!
//! ## Usage
//! ```ignore
//! use sndstats_core::{time_seeded_rng, GainMode, MixSession};
//! use sndstats_wav::{WavFileSink, WavFileSource};
//!
//! let mut inputs = vec![
//!     WavFileSource::open_mono("a.wav")?,
//!     WavFileSource::open_mono("b.wav")?,
//! ];
//! let mut output = WavFileSink::like("mix.wav", &inputs[0])?;
//! let outcome = MixSession::default().run(&mut inputs, &GainMode::Auto, &mut output, &mut time_seeded_rng())?;
//!
//! // Or, including the `mix.metadata.json` sidecar:
//! let outcome = sndstats_wav::mix_files(&MixSession::default(), &["a.wav", "b.wav"], Path::new("mix.wav"), &GainMode::Auto, &mut time_seeded_rng())?;
//! ```

pub mod mix_files;
pub mod wav_sink;
pub mod wav_source;

pub use mix_files::mix_files;
pub use wav_sink::WavFileSink;
pub use wav_source::WavFileSource;

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use approx::assert_abs_diff_eq;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use sndstats_core::{diff_streams, DiffOptions, GainMode, MixSession, SampleSource};

    use super::*;

    const RATE: u32 = 1000;

    fn temp_file_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sndstats_wav_mix_{}_{}.wav", name, std::process::id()))
    }

    fn write_float(path: &Path, samples: &[f32]) {
        let spec = WavSpec {
            channels: 1,
            sample_rate: RATE,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn square(amplitude: f32, frames: usize) -> Vec<f32> {
        (0..frames)
            .map(|i| if i % 2 == 0 { amplitude } else { -amplitude })
            .collect()
    }

    fn cleanup(paths: &[&Path]) {
        for path in paths {
            std::fs::remove_file(path).ok();
        }
    }

    #[test]
    fn literal_mix_of_wav_files() {
        let a = temp_file_path("literal_a");
        let b = temp_file_path("literal_b");
        let out = temp_file_path("literal_out");
        write_float(&a, &[0.25, 0.25, 0.25, 0.25]);
        write_float(&b, &[0.5, 0.5]);

        let mut inputs = vec![WavFileSource::open_mono(&a).unwrap(), WavFileSource::open_mono(&b).unwrap()];
        let mut sink = WavFileSink::like(&out, &inputs[0]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = MixSession::default()
            .run(&mut inputs, &GainMode::Literal(vec![1.0, 1.0]), &mut sink, &mut rng)
            .unwrap();
        assert_eq!(outcome.summary.frames_written, 4);

        let mut mixed = WavFileSource::open(&out).unwrap();
        assert_eq!(mixed.info().frames, 4);
        let mut buf = [0.0f32; 4];
        assert_eq!(mixed.read(&mut buf).unwrap(), 4);
        assert_eq!(buf, [0.75, 0.75, 0.25, 0.25]);

        cleanup(&[&a, &b, &out]);
    }

    #[test]
    fn auto_gain_mix_of_wav_files() {
        let a = temp_file_path("auto_a");
        let b = temp_file_path("auto_b");
        let out = temp_file_path("auto_out");
        write_float(&a, &square(0.25, 1000));
        write_float(&b, &square(0.5, 600));

        let mut inputs = vec![WavFileSource::open_mono(&a).unwrap(), WavFileSource::open_mono(&b).unwrap()];
        let mut sink = WavFileSink::like(&out, &inputs[0]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = MixSession::default()
            .run(&mut inputs, &GainMode::Auto, &mut sink, &mut rng)
            .unwrap();
        assert_abs_diff_eq!(outcome.scales.scales()[1], 1.0, epsilon = 1e-6);

        assert!(outcome.metadata.auto_gain);
        assert_eq!(outcome.metadata.inputs[0], a.display().to_string());
        assert_eq!(outcome.metadata.frames, 1000);

        let mut mixed = WavFileSource::open(&out).unwrap();
        let mut buf = vec![0.0f32; 1000];
        assert_eq!(mixed.read(&mut buf).unwrap(), 1000);
        assert_abs_diff_eq!(buf[0], 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(buf[999], -0.5, epsilon = 1e-3);

        cleanup(&[&a, &b, &out]);
    }

    #[test]
    fn diff_of_wav_files_finds_changed_sample() {
        let a = temp_file_path("diff_a");
        let b = temp_file_path("diff_b");
        write_float(&a, &[0.0, 0.1, 0.2, 0.3]);
        write_float(&b, &[0.0, 0.1, 0.5, 0.3]);

        let mut left = WavFileSource::open(&a).unwrap();
        let mut right = WavFileSource::open(&b).unwrap();
        let report = diff_streams(&mut left, &mut right, &DiffOptions::default()).unwrap();

        assert!(report.is_different());
        assert_eq!(report.differences.len(), 1);
        assert_eq!(report.differences[0].frame, 2);
        assert!(!report.length_mismatch);

        cleanup(&[&a, &b]);
    }
}
