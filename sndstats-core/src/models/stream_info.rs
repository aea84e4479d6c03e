use super::error::StatsError;

/// Descriptor of an audio stream as reported by its source.
///
/// The core only ever borrows the stream behind this descriptor for the
/// length of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    pub channels: u16,
    pub sample_rate: u32,
    pub frames: u64,
    pub seekable: bool,
}

impl StreamInfo {
    pub fn mono(sample_rate: u32, frames: u64, seekable: bool) -> Self {
        Self {
            channels: 1,
            sample_rate,
            frames,
            seekable,
        }
    }

    /// Total duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames as f64 / self.sample_rate as f64
    }

    /// Convert a time in seconds to a frame count at this stream's rate.
    ///
    /// Truncates toward zero; negative times yield 0.
    pub fn secs_to_frames(&self, secs: f64) -> u64 {
        if secs <= 0.0 {
            return 0;
        }
        (self.sample_rate as f64 * secs) as u64
    }

    /// Reject anything that is not a single-channel stream.
    pub fn ensure_mono(&self) -> Result<(), StatsError> {
        if self.channels != 1 {
            return Err(StatsError::ChannelCountUnsupported(self.channels));
        }
        Ok(())
    }

    pub fn ensure_seekable(&self) -> Result<(), StatsError> {
        if !self.seekable {
            return Err(StatsError::SeekFailure("stream is not seekable".into()));
        }
        Ok(())
    }
}
