pub mod memory;
pub mod metadata;
