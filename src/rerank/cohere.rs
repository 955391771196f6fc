//! Cohere API-based reranker implementation.
//!
//! This module provides a reranker backed by Cohere's Rerank API.
//! Requires the `rerank-cohere` feature to be enabled.

use std::any::Any;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{KopisError, Result};
use crate::rerank::reranker::{RerankHit, Reranker};

const DEFAULT_BASE_URL: &str = "https://api.cohere.com";

/// Request structure for the Rerank API.
#[derive(Debug, Serialize)]
struct RerankRequest {
    /// Model identifier to use for reranking.
    model: String,
    /// The search query.
    query: String,
    /// Candidate document texts.
    documents: Vec<String>,
    /// Optional cap on the number of returned results.
    #[serde(skip_serializing_if = "Option::is_none")]
    top_n: Option<usize>,
}

/// Response structure from the Rerank API.
#[derive(Debug, Deserialize)]
struct RerankResponse {
    results: Vec<RerankResponseResult>,
}

/// Individual result from the Rerank API response.
#[derive(Debug, Deserialize)]
struct RerankResponseResult {
    index: usize,
    relevance_score: f32,
}

/// Cohere API-based reranker.
///
/// The service scores every candidate against the query with a
/// cross-encoder and returns indices into the submitted document list in
/// descending relevance order. Retry policy is the caller's concern.
///
/// # Examples
///
/// ```no_run
/// use kopis::rerank::cohere::CohereReranker;
/// use kopis::rerank::reranker::Reranker;
///
/// # async fn example() -> kopis::error::Result<()> {
/// let reranker = CohereReranker::new(
///     std::env::var("CO_API_KEY").unwrap(),
///     "rerank-english-v3.0".to_string(),
/// );
///
/// let documents = ["Carson City is the capital of Nevada.", "Washington, D.C. is the capital of the United States."];
/// let hits = reranker
///     .rerank("What is the capital of the United States?", &documents, Some(1))
///     .await?;
/// assert_eq!(hits[0].index, 1);
/// # Ok(())
/// # }
/// ```
pub struct CohereReranker {
    /// HTTP client for making API requests.
    client: Client,
    /// API key for authentication.
    api_key: String,
    /// Rerank model name (e.g., "rerank-english-v3.0").
    model: String,
    /// API base URL, overridable for self-hosted gateways.
    base_url: String,
}

impl std::fmt::Debug for CohereReranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CohereReranker")
            .field("model", &self.model)
            .finish()
    }
}

impl CohereReranker {
    /// Create a new Cohere reranker.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Reranker for CohereReranker {
    async fn rerank(
        &self,
        query: &str,
        documents: &[&str],
        top_n: Option<usize>,
    ) -> Result<Vec<RerankHit>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let request = RerankRequest {
            model: self.model.clone(),
            query: query.to_string(),
            documents: documents.iter().map(|s| s.to_string()).collect(),
            top_n,
        };

        debug!(
            "reranking {} candidate(s) with model {}",
            documents.len(),
            self.model
        );

        let url = format!("{}/v2/rerank", self.base_url);
        let http_response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| KopisError::rerank(format!("Rerank API request failed: {}", e)))?;

        let status = http_response.status();
        let response_text = http_response
            .text()
            .await
            .map_err(|e| KopisError::rerank(format!("Failed to read response text: {}", e)))?;

        if !status.is_success() {
            return Err(KopisError::rerank(format!(
                "Rerank API error (status {}): {}",
                status, response_text
            )));
        }

        let response: RerankResponse = serde_json::from_str(&response_text).map_err(|e| {
            KopisError::rerank(format!(
                "Failed to parse rerank response: {}. Response text: {}",
                e, response_text
            ))
        })?;

        let mut hits = Vec::with_capacity(response.results.len());
        for result in response.results {
            if result.index >= documents.len() {
                return Err(KopisError::rerank(format!(
                    "Rerank API returned out-of-range index {} for {} documents",
                    result.index,
                    documents.len()
                )));
            }
            hits.push(RerankHit::new(result.index, result.relevance_score));
        }

        Ok(hits)
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
