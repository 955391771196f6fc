//! Deterministic extractive generator.
//!
//! Builds an answer by quoting the supplied documents verbatim, one
//! sentence of preamble followed by each document's text, and emits one
//! citation per quoted document covering its exact span. No model is
//! involved, so the output is fully deterministic and the pipeline can be
//! exercised end to end without network access.

use std::any::Any;

use async_trait::async_trait;

use crate::document::Document;
use crate::error::Result;
use crate::generation::generator::{Citation, Generator, GroundedAnswer};

/// A generator that answers by quoting its source documents.
#[derive(Debug, Clone, Default)]
pub struct ExtractiveGenerator;

impl ExtractiveGenerator {
    /// Creates a new `ExtractiveGenerator`.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Generator for ExtractiveGenerator {
    async fn generate(&self, query: &str, documents: &[Document]) -> Result<GroundedAnswer> {
        if documents.is_empty() {
            return Ok(GroundedAnswer::uncited(format!(
                "No supporting documents were found for: {query}"
            )));
        }

        let mut text = format!("Based on the retrieved documents, regarding {query:?}:\n");
        let mut citations = Vec::with_capacity(documents.len());

        for document in documents {
            text.push_str("- ");
            let start = text.len();
            text.push_str(&document.text);
            let end = text.len();
            text.push('\n');

            citations.push(Citation::new(
                start,
                end,
                document.text.clone(),
                vec![document.id.clone()],
            ));
        }

        Ok(GroundedAnswer { text, citations })
    }

    fn name(&self) -> &str {
        "ExtractiveGenerator"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
