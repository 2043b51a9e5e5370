use serde::{Deserialize, Serialize};

use crate::error::{Result, SemError};

/// A named business concept used to tag and filter documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Ids of related concepts. Informational only; never used for matching.
    #[serde(default)]
    pub related_to: Vec<String>,
}

impl Concept {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            synonyms: Vec::new(),
            related_to: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_related<I, S>(mut self, related: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_to = related.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(SemError::Configuration(
                "concept id must be non-empty".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(SemError::Configuration(format!(
                "concept {} has an empty name",
                self.id
            )));
        }
        Ok(())
    }
}

/// On-disk shape of a concepts file: a top-level `concepts` list.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ConceptFile {
    #[serde(default)]
    pub concepts: Option<Vec<Concept>>,
}
