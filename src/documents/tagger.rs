//! Concept tagging for documents.

use rayon::prelude::*;

use crate::concepts::ConceptStore;

use super::{Document, EmbeddingState, TaggedDocument};

/// Tag one document with the concepts found in its title and content.
#[must_use]
pub fn tag(document: &Document, store: &ConceptStore) -> TaggedDocument {
    let text = format!("{} {}", document.title, document.content);
    TaggedDocument {
        document: document.clone(),
        matched_concepts: store.match_text(&text),
        embedding: EmbeddingState::Unembedded,
    }
}

/// Tag a batch of documents; output order follows input order.
#[must_use]
pub fn tag_all(documents: &[Document], store: &ConceptStore) -> Vec<TaggedDocument> {
    documents.par_iter().map(|doc| tag(doc, store)).collect()
}
