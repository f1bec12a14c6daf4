use thiserror::Error;

/// Returned when a read runs past the end of the buffer or meets data that
/// cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Failed to deserialize: buffer exhausted or malformed")]
pub struct SerdeErr;
