pub mod accumulator;
pub mod auto_gain;
pub mod bleep;
mod block;
pub mod diff;
pub mod mixer;
pub mod sampling;
