//! Document data model.
//!
//! A [`Document`] is an opaque identifier plus associated text and optional
//! metadata. The ranking core only ever operates on a document's embedding;
//! the document itself is carried alongside purely so ranked indices can be
//! mapped back to source material for display or for a downstream rerank
//! or generation call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A text document with an opaque identifier and optional metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque identifier, unique within one document collection.
    pub id: String,
    /// The document text.
    pub text: String,
    /// Optional metadata fields (title, source, language, etc.)
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Create a new document with a generated identifier.
    pub fn new<T: Into<String>>(text: T) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    /// Create a new document with an explicit identifier.
    pub fn with_id<I: Into<String>, T: Into<String>>(id: I, text: T) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    /// Attach a title metadata field.
    pub fn with_title<T: Into<String>>(mut self, title: T) -> Self {
        self.metadata.insert("title".to_string(), title.into());
        self
    }

    /// Attach an arbitrary metadata field.
    pub fn with_metadata<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Get the document title, if any.
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").map(|s| s.as_str())
    }

    /// Get a metadata field by key.
    pub fn get_metadata(&self, key: &str) -> Option<&String> {
        self.metadata.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let a = Document::new("first");
        let b = Document::new("second");
        assert_ne!(a.id, b.id);
        assert_eq!(a.text, "first");
    }

    #[test]
    fn test_with_id() {
        let doc = Document::with_id("doc_0", "some text");
        assert_eq!(doc.id, "doc_0");
        assert_eq!(doc.text, "some text");
    }

    #[test]
    fn test_title_metadata() {
        let doc = Document::new("body").with_title("Crafting a Resume");
        assert_eq!(doc.title(), Some("Crafting a Resume"));

        let untitled = Document::new("body");
        assert!(untitled.title().is_none());
    }

    #[test]
    fn test_with_metadata() {
        let doc = Document::new("body").with_metadata("lang", "en");
        assert_eq!(doc.get_metadata("lang"), Some(&"en".to_string()));
        assert!(doc.get_metadata("missing").is_none());
    }
}
