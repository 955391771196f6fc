//! Exact top-k similarity ranking over dense embeddings.
//!
//! This module implements brute force nearest-neighbor retrieval: every
//! document vector is scored against the query vector, results are ordered
//! by descending score with a stable tie-break, and the top k hits are
//! returned.
//!
//! # Module Structure
//!
//! - `types`: Hit and result container types
//! - `ranker`: The ranking implementation

pub mod ranker;
pub mod types;

pub use self::ranker::SimilarityRanker;
pub use self::types::{RankedHit, Ranking};
