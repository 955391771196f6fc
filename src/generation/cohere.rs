//! Cohere API-based grounded generator implementation.
//!
//! This module provides a generator backed by Cohere's Chat API in
//! document-grounded mode. Requires the `generation-cohere` feature to be
//! enabled.

use std::any::Any;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{KopisError, Result};
use crate::generation::generator::{Citation, Generator, GroundedAnswer};

const DEFAULT_BASE_URL: &str = "https://api.cohere.com";

/// Request structure for the Chat API.
#[derive(Debug, Serialize)]
struct ChatRequest {
    /// Model identifier to use for generation.
    model: String,
    /// Conversation messages; a single user turn carrying the query.
    messages: Vec<ChatMessage>,
    /// Documents the answer must be grounded in.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    documents: Vec<ChatDocument>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatDocument {
    id: String,
    data: ChatDocumentData,
}

#[derive(Debug, Serialize)]
struct ChatDocumentData {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

/// Response structure from the Chat API.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Vec<ChatResponseContent>,
    #[serde(default)]
    citations: Vec<ChatResponseCitation>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponseCitation {
    start: usize,
    end: usize,
    text: String,
    #[serde(default)]
    sources: Vec<ChatResponseCitationSource>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseCitationSource {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    document: Option<serde_json::Value>,
}

impl ChatResponseCitationSource {
    /// The cited document id, from the source id or the echoed document.
    fn document_id(&self) -> Option<String> {
        if let Some(id) = &self.id {
            return Some(id.clone());
        }
        self.document
            .as_ref()
            .and_then(|doc| doc.get("id"))
            .and_then(|id| id.as_str())
            .map(|id| id.to_string())
    }
}

/// Cohere API-based grounded generator.
///
/// Sends the query as a single user message together with the retrieved
/// documents and decodes the answer text plus citation spans from the
/// response. Retry policy is the caller's concern.
///
/// # Examples
///
/// ```no_run
/// use kopis::document::Document;
/// use kopis::generation::cohere::CohereGenerator;
/// use kopis::generation::generator::Generator;
///
/// # async fn example() -> kopis::error::Result<()> {
/// let generator = CohereGenerator::new(
///     std::env::var("CO_API_KEY").unwrap(),
///     "command-r-plus".to_string(),
/// );
///
/// let documents = vec![Document::with_id("doc_0", "The call is on Thursday.")];
/// let answer = generator.generate("When is the call?", &documents).await?;
/// println!("{}", answer.text);
/// # Ok(())
/// # }
/// ```
pub struct CohereGenerator {
    /// HTTP client for making API requests.
    client: Client,
    /// API key for authentication.
    api_key: String,
    /// Chat model name (e.g., "command-r-plus").
    model: String,
    /// API base URL, overridable for self-hosted gateways.
    base_url: String,
}

impl std::fmt::Debug for CohereGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CohereGenerator")
            .field("model", &self.model)
            .finish()
    }
}

impl CohereGenerator {
    /// Create a new Cohere generator.
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
impl Generator for CohereGenerator {
    async fn generate(&self, query: &str, documents: &[Document]) -> Result<GroundedAnswer> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: query.to_string(),
            }],
            documents: documents
                .iter()
                .map(|doc| ChatDocument {
                    id: doc.id.clone(),
                    data: ChatDocumentData {
                        text: doc.text.clone(),
                        title: doc.title().map(|t| t.to_string()),
                    },
                })
                .collect(),
        };

        debug!(
            "generating grounded answer over {} document(s) with model {}",
            documents.len(),
            self.model
        );

        let url = format!("{}/v2/chat", self.base_url);
        let http_response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| KopisError::generation(format!("Chat API request failed: {}", e)))?;

        let status = http_response.status();
        let response_text = http_response
            .text()
            .await
            .map_err(|e| KopisError::generation(format!("Failed to read response text: {}", e)))?;

        if !status.is_success() {
            return Err(KopisError::generation(format!(
                "Chat API error (status {}): {}",
                status, response_text
            )));
        }

        let response: ChatResponse = serde_json::from_str(&response_text).map_err(|e| {
            KopisError::generation(format!(
                "Failed to parse chat response: {}. Response text: {}",
                e, response_text
            ))
        })?;

        let text = response
            .message
            .content
            .iter()
            .filter(|content| content.kind == "text")
            .map(|content| content.text.as_str())
            .collect::<Vec<_>>()
            .join("");

        let citations = response
            .message
            .citations
            .into_iter()
            .map(|citation| {
                let document_ids = citation
                    .sources
                    .iter()
                    .filter_map(|source| source.document_id())
                    .collect();
                Citation::new(citation.start, citation.end, citation.text, document_ids)
            })
            .collect();

        Ok(GroundedAnswer { text, citations })
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
