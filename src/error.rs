//! Error types for the Binnet crate.
//!
//! The numeric kernels treat contract violations (bad bit indices, mismatched
//! lengths) as panics. This error type covers the fallible surface around
//! them: layer construction, configuration and weight assignment.

use thiserror::Error;

/// The main error type for Binnet operations.
#[derive(Error, Debug)]
pub enum BinnetError {
    /// Input size does not match expected size
    #[error("Invalid input size: expected {expected}, got {actual}")]
    InvalidInputSize {
        /// Expected size
        expected: usize,
        /// Actual size received
        actual: usize,
    },

    /// Invalid parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Index out of bounds
    #[error("Index out of bounds: index {index}, length {length}")]
    IndexOutOfBounds {
        /// The index that was accessed
        index: usize,
        /// The valid length
        length: usize,
    },

    /// Configuration could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A specialized `Result` type for Binnet operations.
pub type Result<T> = std::result::Result<T, BinnetError>;
