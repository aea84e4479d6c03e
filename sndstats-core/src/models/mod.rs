pub mod config;
pub mod error;
pub mod mix_result;
pub mod scale_table;
pub mod stream_info;
pub mod summary;
