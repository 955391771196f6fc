//! Embedding-based reranker.
//!
//! Reranks candidates locally by embedding the query and the candidate
//! texts and scoring them with the similarity ranking core. Useful as an
//! offline alternative to a hosted cross-encoder, and as a second scoring
//! pass with a different embedding model than the one used for first-stage
//! retrieval.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::embedding::embedder::{EmbedInput, Embedder};
use crate::error::Result;
use crate::ranking::ranker::SimilarityRanker;
use crate::rerank::reranker::{RerankHit, Reranker};
use crate::vector::SimilarityMetric;

/// Reranker built from an embedder and the similarity ranking core.
#[derive(Debug)]
pub struct EmbeddingReranker {
    embedder: Arc<dyn Embedder>,
    ranker: SimilarityRanker,
}

impl EmbeddingReranker {
    /// Create a new embedding reranker scoring by dot product.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self::with_metric(embedder, SimilarityMetric::DotProduct)
    }

    /// Create a new embedding reranker with an explicit metric.
    pub fn with_metric(embedder: Arc<dyn Embedder>, metric: SimilarityMetric) -> Self {
        Self {
            embedder,
            ranker: SimilarityRanker::new(metric),
        }
    }
}

#[async_trait]
impl Reranker for EmbeddingReranker {
    async fn rerank(
        &self,
        query: &str,
        documents: &[&str],
        top_n: Option<usize>,
    ) -> Result<Vec<RerankHit>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.embedder.embed(&EmbedInput::Query(query)).await?;

        let inputs: Vec<EmbedInput<'_>> =
            documents.iter().copied().map(EmbedInput::Document).collect();
        let document_vectors = self.embedder.embed_batch(&inputs).await?;

        let k = top_n.unwrap_or(documents.len());
        let ranking = self.ranker.rank(&query_vector, &document_vectors, k)?;

        debug!(
            "embedding rerank scored {} candidate(s), kept {}",
            documents.len(),
            ranking.len()
        );

        Ok(ranking
            .hits
            .into_iter()
            .map(|hit| RerankHit::new(hit.index, hit.score))
            .collect())
    }

    fn name(&self) -> &str {
        "EmbeddingReranker"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
