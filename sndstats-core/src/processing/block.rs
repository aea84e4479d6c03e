use crate::models::error::StatsError;

/// Allocate a zeroed working block of `len` samples.
///
/// Blocks are owned by the operation that allocates them and dropped when
/// it returns.
pub(crate) fn alloc_block(len: usize) -> Result<Vec<f32>, StatsError> {
    let mut block = Vec::new();
    block
        .try_reserve_exact(len)
        .map_err(|e| StatsError::AllocationFailure(format!("{} samples: {}", len, e)))?;
    block.resize(len, 0.0);
    Ok(block)
}

/// Convert a frame count to a block length, rejecting counts that cannot be addressed.
pub(crate) fn block_len(frames: u64) -> Result<usize, StatsError> {
    usize::try_from(frames)
        .map_err(|_| StatsError::AllocationFailure(format!("block of {} frames is not addressable", frames)))
}
