//! Retrieval pipeline orchestration.
//!
//! Wires an embedder, an optional reranker, and a generator around the
//! similarity ranking core: documents are embedded and held in memory, a
//! query is embedded and ranked against them, the candidates optionally go
//! through a rerank pass, and the surviving documents ground a generated
//! answer. Every collaborator is injected explicitly; the pipeline owns no
//! global state.
//!
//! # Module Structure
//!
//! - `config`: Pipeline configuration
//! - `engine`: The pipeline and its builder

pub mod config;
pub mod engine;

pub use self::config::RagPipelineConfig;
pub use self::engine::{RagPipeline, RagPipelineBuilder, RetrievedDocument};
