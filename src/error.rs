//! Error types for trueno-histogram operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while computing or exporting a histogram.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for framebuffer or export target.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Bin width text that is not a positive integer.
    #[error("Invalid bin width: {0:?} (expected a positive integer)")]
    InvalidBinWidth(String),

    /// Bin layout that cannot be represented (too many bins or overflowing bounds).
    #[error("Bin layout out of range: {0}")]
    BinRange(String),

    /// Scale domain error (e.g., zero-width domain).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}
