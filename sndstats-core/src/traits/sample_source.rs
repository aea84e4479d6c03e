use crate::models::error::StatsError;
use crate::models::stream_info::StreamInfo;

/// A readable stream of amplitude samples.
///
/// Implemented by:
/// - `MemorySource` (in-memory samples)
/// - `WavFileSource` in the `sndstats-wav` crate
pub trait SampleSource {
    /// Format and size of the stream.
    fn info(&self) -> StreamInfo;

    /// Read up to `buf.len()` samples into the front of `buf`.
    ///
    /// Returns the number of samples read. `0` means the stream is exhausted.
    fn read(&mut self, buf: &mut [f32]) -> Result<usize, StatsError>;

    /// Move the read cursor to an absolute frame offset.
    ///
    /// Fails with `SeekFailure` on a non-seekable stream or a rejected offset.
    fn seek(&mut self, frame: u64) -> Result<(), StatsError>;

    /// Move the read cursor back to the first frame.
    fn rewind(&mut self) -> Result<(), StatsError> {
        self.seek(0)
    }

    /// Human-readable name for reports, such as a file path.
    fn label(&self) -> Option<String> {
        None
    }
}

/// The write side of a stream; only the mixer writes.
pub trait SampleSink {
    /// Append all of `samples` to the stream.
    fn write(&mut self, samples: &[f32]) -> Result<(), StatsError>;

    /// Flush and finalize the stream. Further writes are an error.
    fn finish(&mut self) -> Result<(), StatsError> {
        Ok(())
    }
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn info(&self) -> StreamInfo {
        (**self).info()
    }

    fn read(&mut self, buf: &mut [f32]) -> Result<usize, StatsError> {
        (**self).read(buf)
    }

    fn seek(&mut self, frame: u64) -> Result<(), StatsError> {
        (**self).seek(frame)
    }

    fn rewind(&mut self) -> Result<(), StatsError> {
        (**self).rewind()
    }

    fn label(&self) -> Option<String> {
        (**self).label()
    }
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    fn info(&self) -> StreamInfo {
        (**self).info()
    }

    fn read(&mut self, buf: &mut [f32]) -> Result<usize, StatsError> {
        (**self).read(buf)
    }

    fn seek(&mut self, frame: u64) -> Result<(), StatsError> {
        (**self).seek(frame)
    }

    fn rewind(&mut self) -> Result<(), StatsError> {
        (**self).rewind()
    }

    fn label(&self) -> Option<String> {
        (**self).label()
    }
}

impl<S: SampleSink + ?Sized> SampleSink for Box<S> {
    fn write(&mut self, samples: &[f32]) -> Result<(), StatsError> {
        (**self).write(samples)
    }

    fn finish(&mut self) -> Result<(), StatsError> {
        (**self).finish()
    }
}
