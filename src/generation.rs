//! Grounded answer generation abstraction and implementations.
//!
//! A generator produces an answer to a query grounded in a set of supplied
//! documents, together with citations mapping spans of the answer back to
//! the documents that justified them.
//!
//! # Module Structure
//!
//! - `generator`: The `Generator` trait, answers, and citations
//! - `cohere`: Hosted chat API binding (feature `generation-cohere`)
//! - `extractive`: Deterministic local generator for offline use

#[cfg(feature = "generation-cohere")]
pub mod cohere;
pub mod extractive;
pub mod generator;

pub use self::generator::{Citation, Generator, GroundedAnswer};
