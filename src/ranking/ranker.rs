//! Brute force similarity ranker.

use crate::error::{KopisError, Result};
use crate::ranking::types::{RankedHit, Ranking};
use crate::vector::{SimilarityMetric, Vector};

/// Exact similarity ranker over a set of document vectors.
///
/// Scoring is a pure in-memory computation: no I/O, no shared state, no
/// mutation of the inputs. Calls are deterministic for fixed inputs, so
/// concurrent callers need no coordination.
///
/// # Examples
///
/// ```
/// use kopis::ranking::ranker::SimilarityRanker;
///
/// let ranker = SimilarityRanker::default();
/// let query = [1.0, 0.0];
/// let documents: Vec<Vec<f32>> = vec![
///     vec![1.0, 0.0],
///     vec![0.0, 1.0],
///     vec![0.5, 0.5],
/// ];
/// let refs: Vec<&[f32]> = documents.iter().map(|d| d.as_slice()).collect();
///
/// let ranking = ranker.rank_slices(&query, &refs, 2).unwrap();
/// assert_eq!(ranking.indices(), vec![0, 2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimilarityRanker {
    metric: SimilarityMetric,
}

impl SimilarityRanker {
    /// Create a new ranker using the given metric.
    pub fn new(metric: SimilarityMetric) -> Self {
        Self { metric }
    }

    /// Get the similarity metric this ranker scores with.
    pub fn metric(&self) -> SimilarityMetric {
        self.metric
    }

    /// Rank document vectors against a query vector and return the top k.
    ///
    /// Every document vector must share the query's dimensionality;
    /// otherwise the whole call fails with
    /// [`KopisError::DimensionMismatch`] and produces no partial results.
    /// Zero documents or `k == 0` yield an empty ranking.
    ///
    /// The returned hits are sorted by descending score. Documents with
    /// equal scores keep their relative input order, and the result length
    /// is exactly `min(k, documents.len())`.
    pub fn rank(&self, query: &Vector, documents: &[Vector], k: usize) -> Result<Ranking> {
        let refs: Vec<&[f32]> = documents.iter().map(|d| d.data.as_slice()).collect();
        self.rank_slices(&query.data, &refs, k)
    }

    /// Slice-based variant of [`rank`](Self::rank).
    pub fn rank_slices(&self, query: &[f32], documents: &[&[f32]], k: usize) -> Result<Ranking> {
        let dimension = query.len();
        for document in documents {
            if document.len() != dimension {
                return Err(KopisError::dimension_mismatch(dimension, document.len()));
            }
        }

        let mut ranking = Ranking::new();
        ranking.candidates_examined = documents.len();

        if documents.is_empty() || k == 0 {
            return Ok(ranking);
        }

        let scores = self.metric.batch_score(query, documents)?;

        let mut hits: Vec<RankedHit> = scores
            .into_iter()
            .enumerate()
            .map(|(index, score)| RankedHit::new(index, score))
            .collect();

        // Stable sort: equal scores keep ascending input order
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        hits.truncate(k.min(documents.len()));
        ranking.hits = hits;

        Ok(ranking)
    }
}
