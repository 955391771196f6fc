//! Embedder serving pre-computed vectors.
//!
//! This module provides a [`PrecomputedEmbedder`] that performs no model
//! inference. Vectors are registered up front, keyed by their exact text,
//! and served on demand. It is the embedder of choice for tests and for
//! corpora whose embeddings were computed offline.
//!
//! # Behavior
//!
//! - [`PrecomputedEmbedder::embed()`] returns the registered vector for the
//!   input text, ignoring the query/document role tag
//! - Unregistered text returns an error
//! - Registered vectors must match the declared dimensionality

use std::any::Any;
use std::collections::HashMap;

use async_trait::async_trait;

use crate::embedding::embedder::{EmbedInput, Embedder};
use crate::error::{KopisError, Result};
use crate::vector::Vector;

/// An embedder that serves registered text-to-vector mappings.
///
/// # Example
///
/// ```
/// use kopis::embedding::embedder::{EmbedInput, Embedder};
/// use kopis::embedding::precomputed::PrecomputedEmbedder;
///
/// # tokio_test::block_on(async {
/// let embedder = PrecomputedEmbedder::new(2)
///     .with_vector("hello", vec![1.0, 0.0])
///     .unwrap();
///
/// let vector = embedder.embed(&EmbedInput::Query("hello")).await.unwrap();
/// assert_eq!(vector.data, vec![1.0, 0.0]);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrecomputedEmbedder {
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl PrecomputedEmbedder {
    /// Creates a new `PrecomputedEmbedder` producing vectors of the given
    /// dimensionality.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: HashMap::new(),
        }
    }

    /// Register a vector for a text, builder style.
    pub fn with_vector<T: Into<String>>(mut self, text: T, vector: Vec<f32>) -> Result<Self> {
        self.insert(text, vector)?;
        Ok(self)
    }

    /// Register a vector for a text.
    pub fn insert<T: Into<String>>(&mut self, text: T, vector: Vec<f32>) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(KopisError::dimension_mismatch(self.dimension, vector.len()));
        }
        self.vectors.insert(text.into(), vector);
        Ok(())
    }

    /// Number of registered texts.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if no texts are registered.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[async_trait]
impl Embedder for PrecomputedEmbedder {
    /// Returns the registered vector for the input text.
    async fn embed(&self, input: &EmbedInput<'_>) -> Result<Vector> {
        let text = input.text();
        let data = self.vectors.get(text).ok_or_else(|| {
            KopisError::invalid_argument(format!("no pre-computed vector registered for {text:?}"))
        })?;

        let mut vector = Vector::new(data.clone());
        vector.set_original_text(text);
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "PrecomputedEmbedder"
    }

    /// Returns a reference to self as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PrecomputedEmbedder {
        PrecomputedEmbedder::new(3)
            .with_vector("alpha", vec![1.0, 0.0, 0.0])
            .unwrap()
            .with_vector("beta", vec![0.0, 1.0, 0.0])
            .unwrap()
    }

    #[test]
    fn test_new() {
        let embedder = PrecomputedEmbedder::new(3);
        assert!(embedder.is_empty());
        assert_eq!(embedder.dimension(), 3);
    }

    #[test]
    fn test_insert_validates_dimension() {
        let mut embedder = PrecomputedEmbedder::new(3);
        let err = embedder.insert("bad", vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, KopisError::DimensionMismatch { .. }));
        assert!(embedder.is_empty());
    }

    #[test]
    fn test_embed_known_text() {
        let embedder = sample();
        let vector =
            tokio_test::block_on(embedder.embed(&EmbedInput::Document("alpha"))).unwrap();
        assert_eq!(vector.data, vec![1.0, 0.0, 0.0]);
        assert_eq!(vector.original_text(), Some("alpha"));
    }

    #[test]
    fn test_embed_unknown_text() {
        let embedder = sample();
        let result = tokio_test::block_on(embedder.embed(&EmbedInput::Query("gamma")));
        assert!(result.is_err());
    }

    #[test]
    fn test_role_tag_is_ignored() {
        let embedder = sample();
        let as_query = tokio_test::block_on(embedder.embed(&EmbedInput::Query("beta"))).unwrap();
        let as_document =
            tokio_test::block_on(embedder.embed(&EmbedInput::Document("beta"))).unwrap();
        assert_eq!(as_query.data, as_document.data);
    }

    #[test]
    fn test_len() {
        assert_eq!(sample().len(), 2);
    }

    #[test]
    fn test_name() {
        assert_eq!(sample().name(), "PrecomputedEmbedder");
    }

    #[test]
    fn test_as_any() {
        let embedder = sample();
        let any = embedder.as_any();
        assert!(any.downcast_ref::<PrecomputedEmbedder>().is_some());
    }
}
