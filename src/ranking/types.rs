//! Common types produced by ranking operations.

use serde::{Deserialize, Serialize};

/// A single ranked hit.
///
/// `index` is the position of the document vector in the caller's input
/// sequence, which the caller uses to slice the original document
/// collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedHit {
    /// Index of the document in the input sequence.
    pub index: usize,
    /// Relevance score (higher is more relevant).
    pub score: f32,
}

impl RankedHit {
    /// Create a new hit.
    pub fn new(index: usize, score: f32) -> Self {
        Self { index, score }
    }
}

/// An ordered collection of ranked hits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    /// Hits in descending score order.
    pub hits: Vec<RankedHit>,
    /// Total number of candidate vectors examined.
    pub candidates_examined: usize,
}

impl Ranking {
    /// Create new empty ranking results.
    pub fn new() -> Self {
        Self {
            hits: Vec::new(),
            candidates_examined: 0,
        }
    }

    /// Check if the ranking is empty.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Get the number of hits.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Get the scores in hit order.
    pub fn scores(&self) -> Vec<f32> {
        self.hits.iter().map(|hit| hit.score).collect()
    }

    /// Get the document indices in hit order.
    pub fn indices(&self) -> Vec<usize> {
        self.hits.iter().map(|hit| hit.index).collect()
    }

    /// Keep only the first k hits.
    pub fn truncate_to(&mut self, k: usize) {
        if self.hits.len() > k {
            self.hits.truncate(k);
        }
    }

    /// Get the best (highest scoring) hit.
    pub fn best_hit(&self) -> Option<&RankedHit> {
        self.hits.first()
    }
}
