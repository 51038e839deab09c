use crate::error::SqlBinderError;

/// Split `items` into consecutive chunks of at most `batch_size` elements.
///
/// Order is preserved; every chunk except possibly the last is exactly
/// `batch_size` long, and concatenating the chunks reconstructs the input.
/// This bounds the number of placeholders a batched statement generates.
///
/// # Errors
///
/// Returns `SqlBinderError::InvalidBatchSize` when `batch_size` is zero.
pub fn chunk<T>(items: &[T], batch_size: usize) -> Result<Vec<&[T]>, SqlBinderError> {
    if batch_size == 0 {
        return Err(SqlBinderError::InvalidBatchSize);
    }
    Ok(items.chunks(batch_size).collect())
}
