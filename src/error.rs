use thiserror::Error;

pub type Result<T> = std::result::Result<T, RingError>;

/// Failures reported by [`RingBuffer`](crate::RingBuffer) operations.
///
/// A failed call never changes the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingError {
    #[error("capacity must be greater than 0")]
    InvalidCapacity,
    #[error("buffer is empty")]
    EmptyBuffer,
    #[error("index {index} out of range for buffer of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cannot resize to {requested}: buffer holds {len} elements")]
    CapacityTooSmall { requested: usize, len: usize },
}
