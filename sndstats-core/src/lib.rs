//! # sndstats-core
//!
//! Format-agnostic core for single-channel audio statistics and mixing.
//!
//! Provides a streaming moment accumulator, linear and randomized sampling
//! strategies, auto-gain scale computation, and a block mixer. File formats
//! live in backend crates (`sndstats-wav`) that implement the
//! `SampleSource` / `SampleSink` traits.
//!
//! ## Architecture
//!
//! ```text
//! sndstats-core (this crate)
//! ├── traits/       ← SampleSource, SampleSink
//! ├── models/       ← StatsError, StreamInfo, configurations, ScaleTable, summaries
//! ├── processing/   ← StatsAccumulator, sampling, auto-gain, Mixer, bleep amplitude, diff
//! ├── session/      ← MixSession (gain + mix + finalize)
//! └── storage/      ← in-memory streams, JSON mix metadata
//! ```
//!
//! Everything runs on the calling thread with blocking I/O. Random sampling
//! takes a caller-owned RNG so runs can be reproduced with a fixed seed.

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::config::{AutoGainConfiguration, MixConfiguration, RandomSampling, SamplingConfiguration, ScanWindow};
pub use models::error::StatsError;
pub use models::mix_result::{MixMetadata, MixSummary};
pub use models::scale_table::ScaleTable;
pub use models::stream_info::StreamInfo;
pub use models::summary::StatsSummary;
pub use processing::accumulator::StatsAccumulator;
pub use processing::auto_gain::{auto_gain, compute_scales, estimate_std};
pub use processing::bleep::{estimate_bleep_amplitude, BLEEP_SAMPLING};
pub use processing::diff::{diff_streams, DiffOptions, DiffReport, SampleDifference};
pub use processing::mixer::Mixer;
pub use processing::sampling::{collect_statistics, sample_random, scan_linear, time_seeded_rng};
pub use session::mix_session::{GainMode, MixOutcome, MixSession};
pub use storage::memory::{MemorySink, MemorySource};
pub use traits::sample_source::{SampleSink, SampleSource};
