use crate::models::error::StatsError;
use crate::models::stream_info::StreamInfo;
use crate::traits::sample_source::{SampleSink, SampleSource};

/// In-memory single-channel sample source.
///
/// Reads return at most `max_read` samples per call when set, which lets
/// callers exercise short-read paths.
#[derive(Debug, Clone)]
pub struct MemorySource {
    samples: Vec<f32>,
    sample_rate: u32,
    seekable: bool,
    position: usize,
    max_read: Option<usize>,
}

impl MemorySource {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            seekable: true,
            position: 0,
            max_read: None,
        }
    }

    /// A source that refuses every seek, like a pipe.
    pub fn unseekable(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            seekable: false,
            ..Self::new(samples, sample_rate)
        }
    }

    /// Cap the number of samples returned by a single `read`.
    pub fn with_max_read(mut self, max_read: usize) -> Self {
        self.max_read = Some(max_read.max(1));
        self
    }

    /// Current read cursor in frames.
    pub fn position(&self) -> u64 {
        self.position as u64
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

impl SampleSource for MemorySource {
    fn info(&self) -> StreamInfo {
        StreamInfo::mono(self.sample_rate, self.samples.len() as u64, self.seekable)
    }

    fn read(&mut self, buf: &mut [f32]) -> Result<usize, StatsError> {
        let remaining = self.samples.len().saturating_sub(self.position);
        let mut n = buf.len().min(remaining);
        if let Some(max) = self.max_read {
            n = n.min(max);
        }
        buf[..n].copy_from_slice(&self.samples[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }

    fn seek(&mut self, frame: u64) -> Result<(), StatsError> {
        if !self.seekable {
            return Err(StatsError::SeekFailure("stream is not seekable".into()));
        }
        if frame > self.samples.len() as u64 {
            return Err(StatsError::SeekFailure(format!(
                "offset {} is past the end ({} frames)",
                frame,
                self.samples.len()
            )));
        }
        self.position = frame as usize;
        Ok(())
    }
}

/// In-memory sink collecting everything written to it.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    samples: Vec<f32>,
    writes: usize,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Number of `write` calls received.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl SampleSink for MemorySink {
    fn write(&mut self, samples: &[f32]) -> Result<(), StatsError> {
        if self.finished {
            return Err(StatsError::WriteFailure("sink is already finished".into()));
        }
        self.samples.extend_from_slice(samples);
        self.writes += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), StatsError> {
        self.finished = true;
        Ok(())
    }
}
