//! Error taxonomy shared by the safe API and the C boundary.

use thiserror::Error;

/// Why a generation or configuration call was rejected.
///
/// A rejected call has no side effects: no draws are consumed, nothing is
/// written to the output buffer and the call counter is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// A required pointer was null. Only the C boundary can produce this.
    #[error("required argument is null")]
    NullArgument,
    /// Output buffer is below the fixed minimum.
    #[error("buffer too small: need at least {required} bytes, got {actual}")]
    BufferTooSmall { required: usize, actual: usize },
    /// Reserved; no configuration is currently rejected.
    #[error("invalid configuration")]
    InvalidConfiguration,
}

/// Reject buffers that cannot hold a worst-case phrase plus margin.
pub(crate) fn check_capacity(len: usize) -> Result<(), GenerateError> {
    if len < crate::MIN_BUFFER_SIZE {
        return Err(GenerateError::BufferTooSmall {
            required: crate::MIN_BUFFER_SIZE,
            actual: len,
        });
    }
    Ok(())
}
