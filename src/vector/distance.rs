//! Similarity metrics for vector relevance scoring.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{KopisError, Result};
use crate::util::simd::numeric;

/// Document counts below this are scored sequentially.
const PARALLEL_BATCH_CUTOFF: usize = 100;

/// Similarity metrics for vector relevance scoring.
///
/// Every metric produces a score where higher means more relevant. Scores
/// are not normalized to a fixed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SimilarityMetric {
    /// Raw dot product (the score used by embedding models trained for it)
    #[default]
    DotProduct,
    /// Cosine similarity
    Cosine,
    /// Negated Euclidean (L2) distance
    Euclidean,
}

impl SimilarityMetric {
    /// Calculate the relevance score between two vectors using this metric.
    ///
    /// Higher scores mean more relevant. Returns an error when the vector
    /// dimensionalities differ.
    pub fn score(&self, a: &[f32], b: &[f32]) -> Result<f32> {
        if a.len() != b.len() {
            return Err(KopisError::dimension_mismatch(a.len(), b.len()));
        }

        let result = match self {
            SimilarityMetric::DotProduct => numeric::dot_product(a, b),
            SimilarityMetric::Cosine => {
                let dot_product = numeric::dot_product(a, b);
                let norm_a = numeric::l2_norm(a);
                let norm_b = numeric::l2_norm(b);

                if norm_a == 0.0 || norm_b == 0.0 {
                    0.0
                } else {
                    dot_product / (norm_a * norm_b)
                }
            }
            SimilarityMetric::Euclidean => {
                let distance = a
                    .iter()
                    .zip(b.iter())
                    .map(|(x, y)| (x - y).powi(2))
                    .sum::<f32>()
                    .sqrt();
                -distance
            }
        };

        Ok(result)
    }

    /// Get the name of this similarity metric.
    pub fn name(&self) -> &'static str {
        match self {
            SimilarityMetric::DotProduct => "dot_product",
            SimilarityMetric::Cosine => "cosine",
            SimilarityMetric::Euclidean => "euclidean",
        }
    }

    /// Parse a similarity metric from a string.
    pub fn parse_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "dot_product" | "dot" => Ok(SimilarityMetric::DotProduct),
            "cosine" => Ok(SimilarityMetric::Cosine),
            "euclidean" | "l2" => Ok(SimilarityMetric::Euclidean),
            _ => Err(KopisError::invalid_argument(format!(
                "Unknown similarity metric: {s}"
            ))),
        }
    }

    /// Calculate scores between a query vector and multiple vectors.
    ///
    /// Small batches are scored sequentially; larger ones fan out over the
    /// rayon thread pool. Result order always matches input order.
    pub fn batch_score(&self, query: &[f32], vectors: &[&[f32]]) -> Result<Vec<f32>> {
        if vectors.is_empty() {
            return Ok(Vec::new());
        }

        if vectors.len() < PARALLEL_BATCH_CUTOFF {
            return vectors
                .iter()
                .map(|v| self.score(query, v))
                .collect::<Result<Vec<_>>>();
        }

        vectors
            .par_iter()
            .map(|v| self.score(query, v))
            .collect::<Result<Vec<_>>>()
    }
}
