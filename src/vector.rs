//! Dense vector data model and similarity scoring.
//!
//! This module provides the embedding vector representation used throughout
//! the library and the similarity metrics used to score document vectors
//! against a query vector.
//!
//! # Module Structure
//!
//! - `vector`: Core vector data structure
//! - `distance`: Similarity metrics (dot product, cosine, Euclidean)

pub mod distance;
pub mod vector;

pub use self::distance::SimilarityMetric;
pub use self::vector::Vector;
