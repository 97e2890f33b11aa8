//! Error types for bandlabel-core
//!
//! Every variant carries enough context to diagnose a bad buffer or
//! coordinate without inspecting the data itself.

use thiserror::Error;

/// bandlabel core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {rows}x{cols}")]
    InvalidDimension { rows: u32, cols: u32 },

    /// Buffer length does not match the declared dimensions
    #[error("buffer length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Pixel coordinate outside the image or band
    #[error("index out of bounds: ({row}, {col}) outside {rows}x{cols}")]
    IndexOutOfBounds {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },

    /// Band with end before start
    #[error("invalid row band: [{start}, {end})")]
    InvalidBand { start: u32, end: u32 },

    /// Band reaching past the last image row
    #[error("row band [{start}, {end}) exceeds image height {rows}")]
    BandOutOfRange { start: u32, end: u32, rows: u32 },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
