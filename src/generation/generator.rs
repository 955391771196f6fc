//! Unified grounded generation trait.

use std::any::Any;
use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::Result;

/// A span of generated text mapped back to its supporting documents.
///
/// `start` and `end` are byte offsets into [`GroundedAnswer::text`], with
/// `end` exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Start byte offset of the cited span.
    pub start: usize,
    /// End byte offset (exclusive) of the cited span.
    pub end: usize,
    /// The cited span text.
    pub text: String,
    /// Identifiers of the documents that justified the span.
    pub document_ids: Vec<String>,
}

impl Citation {
    /// Create a new citation.
    pub fn new<T: Into<String>>(
        start: usize,
        end: usize,
        text: T,
        document_ids: Vec<String>,
    ) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            document_ids,
        }
    }
}

/// An answer grounded in source documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundedAnswer {
    /// The generated answer text.
    pub text: String,
    /// Citations mapping answer spans back to source documents.
    pub citations: Vec<Citation>,
}

impl GroundedAnswer {
    /// Create an answer with no citations.
    pub fn uncited<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
        }
    }

    /// Identifiers of every document cited anywhere in the answer, in
    /// first-citation order without duplicates.
    pub fn cited_document_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for citation in &self.citations {
            for id in &citation.document_ids {
                if !ids.contains(id) {
                    ids.push(id.clone());
                }
            }
        }
        ids
    }
}

/// Unified grounded generation trait.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to support concurrent generation
/// operations across multiple threads.
#[async_trait]
pub trait Generator: Send + Sync + Debug {
    /// Generate an answer to `query` grounded in `documents`.
    ///
    /// Implementations decide how to answer when `documents` is empty; they
    /// must not treat it as an error.
    async fn generate(&self, query: &str, documents: &[Document]) -> Result<GroundedAnswer>;

    /// Get the name/identifier of this generator.
    fn name(&self) -> &str {
        "unknown"
    }

    /// Downcast support for runtime type identification.
    fn as_any(&self) -> &dyn Any;
}
