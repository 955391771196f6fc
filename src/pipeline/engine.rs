//! The retrieval pipeline and its builder.

use std::sync::Arc;

use log::debug;

use crate::document::Document;
use crate::embedding::embedder::{EmbedInput, Embedder};
use crate::error::{KopisError, Result};
use crate::generation::generator::{Generator, GroundedAnswer};
use crate::pipeline::config::RagPipelineConfig;
use crate::ranking::ranker::SimilarityRanker;
use crate::rerank::reranker::Reranker;
use crate::vector::Vector;

/// A document returned by first-stage retrieval.
#[derive(Debug, Clone)]
pub struct RetrievedDocument {
    /// The retrieved document.
    pub document: Document,
    /// Relevance score from the ranking stage.
    pub score: f32,
    /// Position of the document in the pipeline's store.
    pub index: usize,
}

/// Builder for [`RagPipeline`].
///
/// Collaborators are injected explicitly; there is no ambient client or
/// global registry to fall back on.
#[derive(Debug, Default)]
pub struct RagPipelineBuilder {
    embedder: Option<Arc<dyn Embedder>>,
    reranker: Option<Arc<dyn Reranker>>,
    generator: Option<Arc<dyn Generator>>,
    config: RagPipelineConfig,
}

impl RagPipelineBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the embedder (required).
    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the reranker (optional).
    pub fn reranker(mut self, reranker: Arc<dyn Reranker>) -> Self {
        self.reranker = Some(reranker);
        self
    }

    /// Set the generator (required for [`RagPipeline::answer`]).
    pub fn generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagPipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if no embedder or no generator was supplied, or if
    /// `retrieve_k` is zero.
    pub fn build(self) -> Result<RagPipeline> {
        let embedder = self
            .embedder
            .ok_or_else(|| KopisError::invalid_argument("pipeline requires an embedder"))?;
        let generator = self
            .generator
            .ok_or_else(|| KopisError::invalid_argument("pipeline requires a generator"))?;

        if self.config.retrieve_k == 0 {
            return Err(KopisError::invalid_argument(
                "retrieve_k must be at least 1",
            ));
        }

        let ranker = SimilarityRanker::new(self.config.metric);

        Ok(RagPipeline {
            embedder,
            reranker: self.reranker,
            generator,
            ranker,
            config: self.config,
            documents: Vec::new(),
            vectors: Vec::new(),
        })
    }
}

/// Retrieval pipeline over an in-memory document collection.
///
/// Documents and their embeddings live for the lifetime of the pipeline
/// value; nothing is persisted. Queries take `&self` and hold no shared
/// mutable state, so concurrent queries need no coordination.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use kopis::document::Document;
/// use kopis::embedding::precomputed::PrecomputedEmbedder;
/// use kopis::generation::extractive::ExtractiveGenerator;
/// use kopis::pipeline::engine::RagPipelineBuilder;
///
/// # tokio_test::block_on(async {
/// let embedder = PrecomputedEmbedder::new(2)
///     .with_vector("capital of the US?", vec![1.0, 0.0])
///     .unwrap()
///     .with_vector("Washington, D.C. is the capital.", vec![0.9, 0.1])
///     .unwrap();
///
/// let mut pipeline = RagPipelineBuilder::new()
///     .embedder(Arc::new(embedder))
///     .generator(Arc::new(ExtractiveGenerator::new()))
///     .build()
///     .unwrap();
///
/// pipeline
///     .add_documents(vec![Document::with_id(
///         "doc_0",
///         "Washington, D.C. is the capital.",
///     )])
///     .await
///     .unwrap();
///
/// let answer = pipeline.answer("capital of the US?").await.unwrap();
/// assert_eq!(answer.cited_document_ids(), vec!["doc_0".to_string()]);
/// # });
/// ```
pub struct RagPipeline {
    embedder: Arc<dyn Embedder>,
    reranker: Option<Arc<dyn Reranker>>,
    generator: Arc<dyn Generator>,
    ranker: SimilarityRanker,
    config: RagPipelineConfig,
    documents: Vec<Document>,
    vectors: Vec<Vector>,
}

impl std::fmt::Debug for RagPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagPipeline")
            .field("embedder", &self.embedder.name())
            .field("documents", &self.documents.len())
            .finish()
    }
}

impl RagPipeline {
    /// Embed and store documents.
    ///
    /// Document texts are embedded in one batch with the document role tag.
    /// Every embedding must share one dimensionality, both within the batch
    /// and with previously stored vectors; otherwise nothing is stored and
    /// the call fails.
    ///
    /// Returns the number of documents added.
    pub async fn add_documents(&mut self, documents: Vec<Document>) -> Result<usize> {
        if documents.is_empty() {
            return Ok(0);
        }

        let inputs: Vec<EmbedInput<'_>> = documents
            .iter()
            .map(|doc| EmbedInput::Document(&doc.text))
            .collect();
        let vectors = self.embedder.embed_batch(&inputs).await?;
        if vectors.len() != documents.len() {
            return Err(KopisError::embedding(format!(
                "embedder returned {} vectors for {} documents",
                vectors.len(),
                documents.len()
            )));
        }

        let expected = self
            .vectors
            .first()
            .map(|v| v.dimension())
            .unwrap_or_else(|| {
                vectors
                    .first()
                    .map(|v| v.dimension())
                    .unwrap_or(self.embedder.dimension())
            });
        for vector in &vectors {
            vector.validate_dimension(expected)?;
        }

        let added = documents.len();
        debug!("indexed {added} document(s), dimension {expected}");

        self.documents.extend(documents);
        self.vectors.extend(vectors);
        Ok(added)
    }

    /// Number of stored documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Check if the pipeline holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Embed the query and rank the stored documents against it.
    ///
    /// Returns at most `retrieve_k` documents in descending score order.
    /// An empty store yields an empty result.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedDocument>> {
        if self.documents.is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.embedder.embed(&EmbedInput::Query(query)).await?;
        let ranking = self
            .ranker
            .rank(&query_vector, &self.vectors, self.config.retrieve_k)?;

        debug!(
            "retrieval examined {} candidate(s), kept {}",
            ranking.candidates_examined,
            ranking.len()
        );

        Ok(ranking
            .hits
            .into_iter()
            .map(|hit| RetrievedDocument {
                document: self.documents[hit.index].clone(),
                score: hit.score,
                index: hit.index,
            })
            .collect())
    }

    /// Answer a query grounded in the stored documents.
    ///
    /// Runs retrieval, optionally reranks the retrieved texts (reordering
    /// them and truncating to `rerank_top_n`), and hands the surviving
    /// documents to the generator. With nothing retrieved the generator
    /// still runs with an empty context and decides how to answer.
    pub async fn answer(&self, query: &str) -> Result<GroundedAnswer> {
        let retrieved = self.retrieve(query).await?;

        let context: Vec<Document> = match &self.reranker {
            Some(reranker) if !retrieved.is_empty() => {
                let texts: Vec<&str> = retrieved
                    .iter()
                    .map(|r| r.document.text.as_str())
                    .collect();
                let hits = reranker
                    .rerank(query, &texts, self.config.rerank_top_n)
                    .await?;

                debug!("rerank kept {} of {} candidate(s)", hits.len(), texts.len());

                hits.into_iter()
                    .map(|hit| retrieved[hit.index].document.clone())
                    .collect()
            }
            _ => retrieved.into_iter().map(|r| r.document).collect(),
        };

        self.generator.generate(query, &context).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::noop::NoOpEmbedder;
    use crate::generation::extractive::ExtractiveGenerator;

    fn minimal_builder() -> RagPipelineBuilder {
        RagPipelineBuilder::new()
            .embedder(Arc::new(NoOpEmbedder::new(2)))
            .generator(Arc::new(ExtractiveGenerator::new()))
    }

    #[test]
    fn test_build_requires_embedder() {
        let result = RagPipelineBuilder::new()
            .generator(Arc::new(ExtractiveGenerator::new()))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_requires_generator() {
        let result = RagPipelineBuilder::new()
            .embedder(Arc::new(NoOpEmbedder::new(2)))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_rejects_zero_retrieve_k() {
        let result = minimal_builder()
            .config(RagPipelineConfig {
                retrieve_k: 0,
                ..RagPipelineConfig::default()
            })
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_minimal() {
        let pipeline = minimal_builder().build().unwrap();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.document_count(), 0);
    }

    #[tokio::test]
    async fn test_add_documents_empty_batch() {
        let mut pipeline = minimal_builder().build().unwrap();
        let added = pipeline.add_documents(Vec::new()).await.unwrap();
        assert_eq!(added, 0);
        assert!(pipeline.is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_with_empty_store() {
        let pipeline = minimal_builder().build().unwrap();
        let retrieved = pipeline.retrieve("anything").await.unwrap();
        assert!(retrieved.is_empty());
    }
}
