//! Error types for bandlabel-region

use thiserror::Error;

/// Errors that can occur during band partitioning and labeling
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] bandlabel_core::Error),

    /// Rank outside the worker group, or an empty group
    #[error("invalid partition: rank {rank} of {workers} workers")]
    InvalidPartition { rank: usize, workers: usize },

    /// Band has more cells than distinct labels are available
    #[error("label space exhausted: {cells} cells in band")]
    LabelOverflow { cells: usize },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
