//! Cohere API-based embedder implementation.
//!
//! This module provides an embedder backed by Cohere's Embed API.
//! Requires the `embeddings-cohere` feature to be enabled.

use std::any::Any;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::embedding::embedder::{EmbedInput, EmbedInputKind, Embedder};
use crate::error::{KopisError, Result};
use crate::vector::Vector;

const DEFAULT_BASE_URL: &str = "https://api.cohere.com";

/// Request structure for the Embed API.
#[derive(Debug, Serialize)]
struct EmbedRequest {
    /// Model identifier to use for embeddings.
    model: String,
    /// Input texts to embed (batch).
    texts: Vec<String>,
    /// Whether the texts are search queries or search documents.
    input_type: String,
    /// Requested representation types.
    embedding_types: Vec<String>,
}

/// Response structure from the Embed API.
#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: EmbedResponseEmbeddings,
}

#[derive(Debug, Deserialize)]
struct EmbedResponseEmbeddings {
    /// Float representations, one per input text.
    float: Vec<Vec<f32>>,
}

/// Cohere API-based embedder.
///
/// Maps [`EmbedInput::Query`] and [`EmbedInput::Document`] to the service's
/// `search_query` and `search_document` input types. The service computes
/// different vectors for the two roles even for identical text.
///
/// Requests carry no retry or backoff policy; transient failures surface as
/// [`KopisError::Embedding`] and retrying is the caller's decision.
///
/// # Examples
///
/// ```no_run
/// use kopis::embedding::cohere::CohereEmbedder;
/// use kopis::embedding::embedder::{EmbedInput, Embedder};
///
/// # async fn example() -> kopis::error::Result<()> {
/// let embedder = CohereEmbedder::new(
///     std::env::var("CO_API_KEY").unwrap(),
///     "embed-english-v3.0".to_string(),
///     1024,
/// );
///
/// let vector = embedder
///     .embed(&EmbedInput::Query("how do I write a resume?"))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct CohereEmbedder {
    /// HTTP client for making API requests.
    client: Client,
    /// API key for authentication.
    api_key: String,
    /// Embedding model name (e.g., "embed-english-v3.0").
    model: String,
    /// Dimension of the output embeddings.
    dimension: usize,
    /// API base URL, overridable for self-hosted gateways.
    base_url: String,
}

impl std::fmt::Debug for CohereEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CohereEmbedder")
            .field("model", &self.model)
            .field("dimension", &self.dimension)
            .finish()
    }
}

impl CohereEmbedder {
    /// Create a new Cohere embedder.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for the hosted service
    /// * `model` - Embedding model name
    /// * `dimension` - Dimensionality the model produces (e.g., 1024)
    pub fn new(api_key: String, model: String, dimension: usize) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            dimension,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn input_type_name(kind: EmbedInputKind) -> &'static str {
        match kind {
            EmbedInputKind::Query => "search_query",
            EmbedInputKind::Document => "search_document",
        }
    }

    /// Embed a batch of same-role texts in a single API request.
    async fn embed_texts(&self, texts: &[&str], kind: EmbedInputKind) -> Result<Vec<Vector>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbedRequest {
            model: self.model.clone(),
            texts: texts.iter().map(|s| s.to_string()).collect(),
            input_type: Self::input_type_name(kind).to_string(),
            embedding_types: vec!["float".to_string()],
        };

        debug!(
            "embedding {} text(s) as {} with model {}",
            texts.len(),
            Self::input_type_name(kind),
            self.model
        );

        let url = format!("{}/v2/embed", self.base_url);
        let http_response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| KopisError::embedding(format!("Embed API request failed: {}", e)))?;

        let status = http_response.status();
        let response_text = http_response
            .text()
            .await
            .map_err(|e| KopisError::embedding(format!("Failed to read response text: {}", e)))?;

        if !status.is_success() {
            return Err(KopisError::embedding(format!(
                "Embed API error (status {}): {}",
                status, response_text
            )));
        }

        let response: EmbedResponse = serde_json::from_str(&response_text).map_err(|e| {
            KopisError::embedding(format!(
                "Failed to parse embed response: {}. Response text: {}",
                e, response_text
            ))
        })?;

        if response.embeddings.float.len() != texts.len() {
            return Err(KopisError::embedding(format!(
                "Embed API returned {} vectors for {} texts",
                response.embeddings.float.len(),
                texts.len()
            )));
        }

        Ok(response
            .embeddings
            .float
            .into_iter()
            .map(Vector::new)
            .collect())
    }
}

#[async_trait]
impl Embedder for CohereEmbedder {
    async fn embed(&self, input: &EmbedInput<'_>) -> Result<Vector> {
        let mut vectors = self.embed_texts(&[input.text()], input.kind()).await?;
        vectors
            .pop()
            .ok_or_else(|| KopisError::embedding("No embedding in response"))
    }

    /// Generate embeddings for multiple inputs.
    ///
    /// Inputs are grouped by role so each group goes out as one native
    /// batch request, then results are restored to input order.
    async fn embed_batch(&self, inputs: &[EmbedInput<'_>]) -> Result<Vec<Vector>> {
        let mut query_positions = Vec::new();
        let mut query_texts = Vec::new();
        let mut document_positions = Vec::new();
        let mut document_texts = Vec::new();

        for (position, input) in inputs.iter().enumerate() {
            match input.kind() {
                EmbedInputKind::Query => {
                    query_positions.push(position);
                    query_texts.push(input.text());
                }
                EmbedInputKind::Document => {
                    document_positions.push(position);
                    document_texts.push(input.text());
                }
            }
        }

        let query_vectors = self
            .embed_texts(&query_texts, EmbedInputKind::Query)
            .await?;
        let document_vectors = self
            .embed_texts(&document_texts, EmbedInputKind::Document)
            .await?;

        let mut results: Vec<Option<Vector>> = vec![None; inputs.len()];
        for (position, vector) in query_positions.into_iter().zip(query_vectors) {
            results[position] = Some(vector);
        }
        for (position, vector) in document_positions.into_iter().zip(document_vectors) {
            results[position] = Some(vector);
        }

        results
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| KopisError::internal("embed batch left a position unfilled"))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_type_names() {
        assert_eq!(
            CohereEmbedder::input_type_name(EmbedInputKind::Query),
            "search_query"
        );
        assert_eq!(
            CohereEmbedder::input_type_name(EmbedInputKind::Document),
            "search_document"
        );
    }

    #[test]
    fn test_request_serialization() {
        let request = EmbedRequest {
            model: "embed-english-v3.0".to_string(),
            texts: vec!["hello".to_string()],
            input_type: "search_query".to_string(),
            embedding_types: vec!["float".to_string()],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "embed-english-v3.0");
        assert_eq!(json["input_type"], "search_query");
        assert_eq!(json["texts"][0], "hello");
    }

    #[test]
    fn test_response_deserialization() {
        let payload = r#"{"embeddings":{"float":[[0.1,0.2],[0.3,0.4]]}}"#;
        let response: EmbedResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.embeddings.float.len(), 2);
        assert_eq!(response.embeddings.float[1], vec![0.3, 0.4]);
    }

    #[test]
    fn test_builder() {
        let embedder = CohereEmbedder::new("key".to_string(), "embed-english-v3.0".to_string(), 1024)
            .with_base_url("http://localhost:9999");
        assert_eq!(embedder.dimension(), 1024);
        assert_eq!(embedder.name(), "embed-english-v3.0");
        assert_eq!(embedder.base_url, "http://localhost:9999");
    }
}
