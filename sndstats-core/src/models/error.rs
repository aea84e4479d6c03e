use thiserror::Error;

/// Errors surfaced by statistics, sampling, auto-gain and mixing operations.
///
/// Every variant is fatal to the operation that produced it. Nothing in the
/// core retries or returns partial results.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("not enough data: needed {needed} observations, have {available}")]
    InsufficientData { needed: u64, available: u64 },

    #[error("seek failed: {0}")]
    SeekFailure(String),

    #[error("unsupported channel count {0}: only single-channel streams are supported")]
    ChannelCountUnsupported(u16),

    #[error("random sampling cannot be combined with a skip or stop window")]
    ConflictingSampleMode,

    #[error("buffer allocation failed: {0}")]
    AllocationFailure(String),

    #[error("stream {stream} has zero variance; cannot derive a gain")]
    DegenerateSignal { stream: usize },

    #[error("cannot open: {0}")]
    CannotOpen(String),

    #[error("read failed: {0}")]
    ReadFailure(String),

    #[error("write failed: {0}")]
    WriteFailure(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl StatsError {
    pub(crate) fn insufficient(needed: u64, available: u64) -> Self {
        Self::InsufficientData { needed, available }
    }
}
