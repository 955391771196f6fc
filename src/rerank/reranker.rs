//! Unified reranker trait.

use std::any::Any;
use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single rerank result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RerankHit {
    /// Index of the document in the input sequence.
    pub index: usize,
    /// Relevance score assigned by the reranker (higher is more relevant).
    pub relevance_score: f32,
}

impl RerankHit {
    /// Create a new rerank hit.
    pub fn new(index: usize, relevance_score: f32) -> Self {
        Self {
            index,
            relevance_score,
        }
    }
}

/// Unified reranker trait.
///
/// Implementations score each candidate document against the query and
/// return hits in descending relevance order. An empty candidate list is
/// not an error; it produces an empty result.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to support concurrent reranking
/// operations across multiple threads.
#[async_trait]
pub trait Reranker: Send + Sync + Debug {
    /// Rerank candidate documents against a query.
    ///
    /// # Arguments
    ///
    /// * `query` - The search query text
    /// * `documents` - Candidate document texts, in retrieval order
    /// * `top_n` - Keep only the n most relevant hits; `None` keeps all
    ///
    /// # Returns
    ///
    /// Hits sorted by descending relevance score, truncated to
    /// `min(top_n, documents.len())` when `top_n` is given.
    async fn rerank(
        &self,
        query: &str,
        documents: &[&str],
        top_n: Option<usize>,
    ) -> Result<Vec<RerankHit>>;

    /// Get the name/identifier of this reranker.
    fn name(&self) -> &str {
        "unknown"
    }

    /// Downcast support for runtime type identification.
    fn as_any(&self) -> &dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rerank_hit_construction() {
        let hit = RerankHit::new(3, 0.75);
        assert_eq!(hit.index, 3);
        assert!((hit.relevance_score - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rerank_hit_serde_round_trip() {
        let hit = RerankHit::new(1, 0.5);
        let json = serde_json::to_string(&hit).unwrap();
        let back: RerankHit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hit);
    }
}
