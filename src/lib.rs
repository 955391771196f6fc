//! # Kopis
//!
//! An embedding-based retrieval and grounded answer library for Rust.
//!
//! ## Features
//!
//! - Exact top-k similarity ranking over dense embeddings
//! - Dot product, cosine, and Euclidean scoring with SIMD kernels
//! - Pluggable embedding, reranking, and generation backends
//! - Dependency-injected retrieval pipeline with citation-bearing answers
//! - Deterministic local backends for offline testing

pub mod document;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod pipeline;
pub mod ranking;
pub mod rerank;
pub mod util;
pub mod vector;

pub mod prelude {
    pub use crate::document::Document;
    pub use crate::embedding::embedder::{EmbedInput, Embedder};
    pub use crate::error::{KopisError, Result};
    pub use crate::generation::generator::{Citation, Generator, GroundedAnswer};
    pub use crate::pipeline::engine::{RagPipeline, RagPipelineBuilder};
    pub use crate::ranking::ranker::SimilarityRanker;
    pub use crate::ranking::types::{RankedHit, Ranking};
    pub use crate::rerank::reranker::{RerankHit, Reranker};
    pub use crate::vector::{SimilarityMetric, Vector};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
