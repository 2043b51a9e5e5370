use std::path::Path;

use crate::error::{Result, SemError};

use super::types::{Concept, ConceptFile};

pub struct ConceptParser;

impl ConceptParser {
    /// Parse a YAML concepts document. `source` is only used in messages.
    pub fn parse_str(content: &str, source: &Path) -> Result<Vec<Concept>> {
        if content.trim().is_empty() {
            return Err(SemError::Configuration(format!(
                "invalid concepts file {}: document is empty",
                source.display()
            )));
        }

        let file: ConceptFile = serde_yaml::from_str(content).map_err(|err| {
            SemError::Configuration(format!(
                "concepts YAML parse error ({}): {err}",
                source.display()
            ))
        })?;

        let concepts = file.concepts.ok_or_else(|| {
            SemError::Configuration(format!(
                "invalid concepts file {}: missing 'concepts' key",
                source.display()
            ))
        })?;

        for concept in &concepts {
            concept.validate()?;
        }
        Ok(concepts)
    }

    pub fn parse_path(path: &Path) -> Result<Vec<Concept>> {
        if !path.exists() {
            return Err(SemError::Configuration(format!(
                "concepts file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path).map_err(|err| {
            SemError::Configuration(format!("read concepts {}: {err}", path.display()))
        })?;
        Self::parse_str(&content, path)
    }
}
