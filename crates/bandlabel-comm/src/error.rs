//! Error types for bandlabel-comm

use crate::communicator::Tag;
use thiserror::Error;

/// Errors reported by point-to-point and collective operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommError {
    /// A world needs at least one rank
    #[error("invalid world size: {size}")]
    InvalidWorldSize { size: usize },

    /// Rank outside the group
    #[error("invalid rank {rank} for world of size {size}")]
    InvalidRank { rank: usize, size: usize },

    /// The peer left the group before the exchange completed
    #[error("peer rank {peer} disconnected")]
    Disconnected { peer: usize },

    /// Message from the peer belongs to a different operation
    #[error("unexpected message from rank {peer}: expected {expected:?}, got {actual:?}")]
    UnexpectedTag {
        peer: usize,
        expected: Tag,
        actual: Tag,
    },

    /// Message payload has a different element type
    #[error("payload from rank {peer} is not a buffer of {expected}")]
    TypeMismatch { peer: usize, expected: &'static str },

    /// Single-value message arrived without a value
    #[error("empty payload from rank {peer}")]
    EmptyPayload { peer: usize },

    /// A worker thread panicked
    #[error("worker rank {rank} panicked")]
    WorkerPanicked { rank: usize },
}

/// Result type for communication operations
pub type CommResult<T> = Result<T, CommError>;
