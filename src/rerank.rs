//! Reranker abstraction and implementations.
//!
//! A reranker performs a secondary relevance-scoring pass over an already
//! retrieved candidate set, producing a reordering by relevance to the
//! query.
//!
//! # Module Structure
//!
//! - `reranker`: The `Reranker` trait and result types
//! - `cohere`: Hosted rerank API binding (feature `rerank-cohere`)
//! - `embedding`: Local reranker built from an embedder and the ranking core

#[cfg(feature = "rerank-cohere")]
pub mod cohere;
pub mod embedding;
pub mod reranker;

pub use self::reranker::{RerankHit, Reranker};
