//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while preparing test data
#[derive(Debug, Error)]
pub enum TestError {
    /// Foreground density outside [0, 1]
    #[error("invalid foreground density: {0}")]
    InvalidDensity(f64),

    /// Rows of a pattern have different lengths
    #[error("ragged pattern: row {row} has {actual} columns, expected {expected}")]
    RaggedPattern {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] bandlabel_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
