//! Unified embedder trait.
//!
//! This module provides the `Embedder` trait, the interface every embedding
//! backend implements. Inputs are tagged with their retrieval role because
//! hosted embedding models produce different vectors for search queries
//! than for the documents being searched; the tag changes what the backend
//! computes, never how the ranking core consumes the result.
//!
//! # Example
//!
//! ```
//! use std::any::Any;
//!
//! use async_trait::async_trait;
//! use kopis::embedding::embedder::{EmbedInput, Embedder};
//! use kopis::error::Result;
//! use kopis::vector::Vector;
//!
//! #[derive(Debug)]
//! struct MyEmbedder {
//!     dimension: usize,
//! }
//!
//! #[async_trait]
//! impl Embedder for MyEmbedder {
//!     async fn embed(&self, input: &EmbedInput<'_>) -> Result<Vector> {
//!         // Generate an embedding for input.text()
//!         let _ = input.text();
//!         Ok(Vector::new(vec![0.0; self.dimension]))
//!     }
//!
//!     fn dimension(&self) -> usize {
//!         self.dimension
//!     }
//!
//!     fn name(&self) -> &str {
//!         "my-embedder"
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//! ```

use std::any::Any;
use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::Result;
use crate::vector::Vector;

/// Input for an embedding operation, tagged with its retrieval role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedInput<'a> {
    /// A search query.
    Query(&'a str),

    /// A document to be searched over.
    Document(&'a str),
}

impl<'a> EmbedInput<'a> {
    /// Get the retrieval role of this input.
    pub fn kind(&self) -> EmbedInputKind {
        match self {
            EmbedInput::Query(_) => EmbedInputKind::Query,
            EmbedInput::Document(_) => EmbedInputKind::Document,
        }
    }

    /// Get the text content of this input.
    pub fn text(&self) -> &'a str {
        match self {
            EmbedInput::Query(text) | EmbedInput::Document(text) => text,
        }
    }

    /// Check if this is a query input.
    pub fn is_query(&self) -> bool {
        matches!(self, EmbedInput::Query(_))
    }

    /// Check if this is a document input.
    pub fn is_document(&self) -> bool {
        matches!(self, EmbedInput::Document(_))
    }
}

/// Retrieval roles an embed input can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbedInputKind {
    /// Search query input.
    Query,

    /// Search document input.
    Document,
}

/// Unified embedder trait.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to support concurrent embedding
/// operations across multiple threads.
#[async_trait]
pub trait Embedder: Send + Sync + Debug {
    /// Generate an embedding vector for the given input.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedding operation fails (backend error,
    /// unknown input, malformed response).
    async fn embed(&self, input: &EmbedInput<'_>) -> Result<Vector>;

    /// Generate embeddings for multiple inputs in batch.
    ///
    /// The default implementation calls `embed` sequentially. Backends with
    /// a native batch endpoint should override this method.
    async fn embed_batch(&self, inputs: &[EmbedInput<'_>]) -> Result<Vec<Vector>> {
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            results.push(self.embed(input).await?);
        }
        Ok(results)
    }

    /// Get the dimensionality of the vectors this embedder produces.
    fn dimension(&self) -> usize;

    /// Get the name/identifier of this embedder.
    ///
    /// This is useful for logging and debugging purposes.
    fn name(&self) -> &str {
        "unknown"
    }

    /// Downcast support for runtime type identification.
    fn as_any(&self) -> &dyn Any;
}
