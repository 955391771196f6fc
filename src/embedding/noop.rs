//! No-operation embedder.
//!
//! This module provides a [`NoOpEmbedder`] that maps every input to the
//! zero vector of a fixed dimensionality. It implements the Null Object
//! Pattern for wiring and plumbing tests where embedding quality is
//! irrelevant.

use std::any::Any;

use async_trait::async_trait;

use crate::embedding::embedder::{EmbedInput, Embedder};
use crate::error::Result;
use crate::vector::Vector;

/// An embedder that returns zero vectors of a fixed dimensionality.
///
/// # When to Use
///
/// - **Plumbing tests**: When embedding output does not matter
/// - **Default placeholder**: As a default value when an embedder is
///   required but never exercised
#[derive(Debug, Clone)]
pub struct NoOpEmbedder {
    dimension: usize,
}

impl NoOpEmbedder {
    /// Creates a new `NoOpEmbedder` with the given dimensionality.
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

#[async_trait]
impl Embedder for NoOpEmbedder {
    /// Returns the zero vector for any input.
    async fn embed(&self, _input: &EmbedInput<'_>) -> Result<Vector> {
        Ok(Vector::new(vec![0.0; self.dimension]))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "NoOpEmbedder"
    }

    /// Returns a reference to self as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any {
        self
    }
}
