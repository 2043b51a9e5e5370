//! Business concept store
//!
//! Concepts are loaded once from YAML and answer case-insensitive substring
//! queries. Match results always follow concept definition order.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, SemError};

pub mod parser;
pub mod types;

pub use parser::ConceptParser;
pub use types::Concept;

/// Lowercased match keys for one concept.
#[derive(Debug, Clone)]
struct MatchKeys {
    name: String,
    synonyms: Vec<String>,
}

impl MatchKeys {
    fn for_concept(concept: &Concept) -> Self {
        Self {
            name: normalize(&concept.name),
            // An empty synonym would be a substring of every text.
            synonyms: concept
                .synonyms
                .iter()
                .map(|s| normalize(s))
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    fn hits(&self, normalized_text: &str) -> bool {
        normalized_text.contains(&self.name)
            || self
                .synonyms
                .iter()
                .any(|synonym| normalized_text.contains(synonym.as_str()))
    }
}

/// Immutable, insertion-ordered set of concepts with unique ids.
#[derive(Debug, Clone, Default)]
pub struct ConceptStore {
    concepts: Vec<Concept>,
    keys: Vec<MatchKeys>,
    index: HashMap<String, usize>,
}

impl ConceptStore {
    /// Build a store from concepts in definition order.
    pub fn from_concepts(concepts: Vec<Concept>) -> Result<Self> {
        let mut index = HashMap::with_capacity(concepts.len());
        for (pos, concept) in concepts.iter().enumerate() {
            concept.validate()?;
            if index.insert(concept.id.clone(), pos).is_some() {
                return Err(SemError::Configuration(format!(
                    "duplicate concept id: {}",
                    concept.id
                )));
            }
        }
        let keys = concepts.iter().map(MatchKeys::for_concept).collect();
        Ok(Self {
            concepts,
            keys,
            index,
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::from_concepts(ConceptParser::parse_str(content, Path::new("<inline>"))?)
    }

    /// Load concepts from a YAML file. Any structural defect aborts the load.
    pub fn load(path: &Path) -> Result<Self> {
        let store = Self::from_concepts(ConceptParser::parse_path(path)?)?;
        info!(
            target: "concepts",
            path = %path.display(),
            count = store.len(),
            "loaded concepts"
        );
        Ok(store)
    }

    /// Ids of every concept whose name, or failing that any synonym, occurs
    /// in `text` (case-insensitive). Ordered by concept definition order.
    #[must_use]
    pub fn match_text(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        let normalized = normalize(text);
        let matched: Vec<String> = self
            .concepts
            .iter()
            .zip(&self.keys)
            .filter(|(_, keys)| keys.hits(&normalized))
            .map(|(concept, _)| concept.id.clone())
            .collect();
        debug!(target: "concepts", matched = ?matched, "matched concepts");
        matched
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Concept> {
        self.index.get(id).map(|&pos| &self.concepts[pos])
    }

    /// All concepts in definition order.
    #[must_use]
    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    /// Concepts listed in `related_to` of `id`. Unknown ids are skipped.
    #[must_use]
    pub fn related(&self, id: &str) -> Vec<&Concept> {
        self.get(id)
            .map(|concept| {
                concept
                    .related_to
                    .iter()
                    .filter_map(|related| self.get(related))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

fn normalize(text: &str) -> String {
    text.to_lowercase()
}
