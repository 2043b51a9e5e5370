//! Documents and their tagged/embedded forms.

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod loader;
pub mod tagger;

pub use loader::MarkdownDirectory;
pub use tagger::{tag, tag_all};

/// A raw business-process document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub doc_id: String,
    pub title: String,
    pub content: String,
}

impl Document {
    pub fn new(
        doc_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            doc_id: doc_id.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Text handed to the embedding provider for this document.
    #[must_use]
    pub fn embedding_text(&self) -> String {
        format!("{}. {}", self.title, self.content)
    }
}

/// Whether a document has been through the embedding stage.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EmbeddingState {
    #[default]
    Unembedded,
    Embedded(Vec<f32>),
}

impl EmbeddingState {
    #[must_use]
    pub fn vector(&self) -> Option<&[f32]> {
        match self {
            Self::Unembedded => None,
            Self::Embedded(vector) => Some(vector),
        }
    }

    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded(_))
    }
}

/// A document annotated with the concepts it mentions.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedDocument {
    pub document: Document,
    /// Concept ids in concept-store order.
    pub matched_concepts: Vec<String>,
    pub embedding: EmbeddingState,
}

impl TaggedDocument {
    #[must_use]
    pub fn doc_id(&self) -> &str {
        &self.document.doc_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.document.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.document.content
    }

    #[must_use]
    pub fn has_any_concept(&self, concept_ids: &[String]) -> bool {
        concept_ids
            .iter()
            .any(|id| self.matched_concepts.contains(id))
    }

    /// Attach an embedding, replacing the `Unembedded` state.
    #[must_use]
    pub fn with_embedding(mut self, vector: Vec<f32>) -> Self {
        self.embedding = EmbeddingState::Embedded(vector);
        self
    }
}

/// Supplies the raw documents the pipeline indexes at startup.
pub trait DocumentSource: Send + Sync {
    /// Ordered documents with unique `doc_id`s.
    fn load_documents(&self) -> Result<Vec<Document>>;
}

impl DocumentSource for Vec<Document> {
    fn load_documents(&self) -> Result<Vec<Document>> {
        Ok(self.clone())
    }
}
