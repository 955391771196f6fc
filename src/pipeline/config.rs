//! Retrieval pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::vector::SimilarityMetric;

/// Configuration for retrieval pipeline operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagPipelineConfig {
    /// Number of documents the first-stage ranking keeps.
    pub retrieve_k: usize,
    /// Cap applied by the rerank stage; `None` keeps every retrieved
    /// candidate.
    pub rerank_top_n: Option<usize>,
    /// Similarity metric for the first-stage ranking.
    pub metric: SimilarityMetric,
}

impl Default for RagPipelineConfig {
    fn default() -> Self {
        Self {
            retrieve_k: 10,
            rerank_top_n: None,
            metric: SimilarityMetric::DotProduct,
        }
    }
}
