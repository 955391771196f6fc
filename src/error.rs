//! Error types for the Kopis library.
//!
//! This module provides error handling for all Kopis operations. All errors
//! are represented by the [`KopisError`] enum.
//!
//! # Examples
//!
//! ```
//! use kopis::error::{KopisError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     // Return an error
//!     Err(KopisError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Kopis operations.
///
/// This enum represents all possible errors that can occur in the Kopis
/// library. It uses the `thiserror` crate for automatic `Error` trait
/// implementation and provides convenient constructor methods for creating
/// specific error types.
#[derive(Error, Debug)]
pub enum KopisError {
    /// A document vector's dimensionality differs from the query vector's.
    ///
    /// This is fatal for the ranking call it occurs in. Retrying cannot fix
    /// malformed input, so callers should surface it instead.
    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimensionality the operation expected.
        expected: usize,
        /// The dimensionality it was given.
        actual: usize,
    },

    /// Embedding backend errors (unsupported input, remote API failure, etc.)
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Reranking backend errors
    #[error("Rerank error: {0}")]
    Rerank(String),

    /// Generation backend errors
    #[error("Generation error: {0}")]
    Generation(String),

    /// I/O errors (network transports, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with KopisError.
pub type Result<T> = std::result::Result<T, KopisError>;

impl KopisError {
    /// Create a new dimension mismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        KopisError::DimensionMismatch { expected, actual }
    }

    /// Create a new embedding error.
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        KopisError::Embedding(msg.into())
    }

    /// Create a new rerank error.
    pub fn rerank<S: Into<String>>(msg: S) -> Self {
        KopisError::Rerank(msg.into())
    }

    /// Create a new generation error.
    pub fn generation<S: Into<String>>(msg: S) -> Self {
        KopisError::Generation(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        KopisError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        KopisError::Other(format!("Internal error: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        KopisError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = KopisError::embedding("Test embedding error");
        assert_eq!(error.to_string(), "Embedding error: Test embedding error");

        let error = KopisError::rerank("Test rerank error");
        assert_eq!(error.to_string(), "Rerank error: Test rerank error");

        let error = KopisError::generation("Test generation error");
        assert_eq!(
            error.to_string(),
            "Generation error: Test generation error"
        );
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let error = KopisError::dimension_mismatch(1024, 512);
        assert_eq!(
            error.to_string(),
            "Vector dimension mismatch: expected 1024, got 512"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let kopis_error = KopisError::from(io_error);

        match kopis_error {
            KopisError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
