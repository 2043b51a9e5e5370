use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SemError};
use crate::search::{DEFAULT_TOP_K, MAX_TOP_K};
use crate::search::cache::DEFAULT_QUERY_CACHE_SIZE;
use crate::search::snippet::DEFAULT_SNIPPET_CHARS;

/// File name looked up in the project directory.
pub const PROJECT_CONFIG_FILE: &str = "semlayer.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Defaults, then config file(s), then `SEMLAYER_*` environment overrides.
    ///
    /// An explicit path (argument or `SEMLAYER_CONFIG`) replaces the
    /// global + project lookup.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SEMLAYER_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(&project_root.join(PROJECT_CONFIG_FILE))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.embedding_dims == 0 {
            return Err(SemError::Configuration(
                "search.embedding_dims must be > 0".to_string(),
            ));
        }
        if self.search.snippet_max_chars == 0 {
            return Err(SemError::Configuration(
                "search.snippet_max_chars must be > 0".to_string(),
            ));
        }
        if !(1..=MAX_TOP_K).contains(&self.search.default_top_k) {
            return Err(SemError::Configuration(format!(
                "search.default_top_k must be between 1 and {MAX_TOP_K}"
            )));
        }
        Ok(())
    }

    /// Cache capacity when the query cache is enabled.
    #[must_use]
    pub const fn query_cache_capacity(&self) -> Option<usize> {
        if self.cache.enabled {
            Some(self.cache.query_capacity)
        } else {
            None
        }
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("semlayer/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|err| {
            SemError::Configuration(format!("read config {}: {err}", path.display()))
        })?;
        let patch = toml::from_str(&raw).map_err(|err| {
            SemError::Configuration(format!("parse config {}: {err}", path.display()))
        })?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.paths {
            self.paths.merge(patch);
        }
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.cache {
            self.cache.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("SEMLAYER_CONCEPTS_PATH") {
            self.paths.concepts = PathBuf::from(value);
        }
        if let Some(value) = env_string("SEMLAYER_DOCUMENTS_DIR") {
            self.paths.documents = PathBuf::from(value);
        }

        if let Some(value) = env_string("SEMLAYER_EMBEDDING_BACKEND") {
            self.search.embedding_backend = value;
        }
        if let Some(value) = env_usize("SEMLAYER_EMBEDDING_DIMS")? {
            self.search.embedding_dims = value;
        }
        if let Some(value) = env_usize("SEMLAYER_DEFAULT_TOP_K")? {
            self.search.default_top_k = value;
        }
        if let Some(value) = env_usize("SEMLAYER_SNIPPET_MAX_CHARS")? {
            self.search.snippet_max_chars = value;
        }

        if let Some(value) = env_bool("SEMLAYER_CACHE_ENABLED") {
            self.cache.enabled = value;
        }
        if let Some(value) = env_usize("SEMLAYER_CACHE_QUERY_CAPACITY")? {
            self.cache.query_capacity = value;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default)]
    pub concepts: PathBuf,
    #[serde(default)]
    pub documents: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            concepts: PathBuf::from("data/concepts.yaml"),
            documents: PathBuf::from("data/documents"),
        }
    }
}

impl PathsConfig {
    fn merge(&mut self, patch: PathsPatch) {
        if let Some(value) = patch.concepts {
            self.concepts = value;
        }
        if let Some(value) = patch.documents {
            self.documents = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub embedding_backend: String,
    #[serde(default)]
    pub embedding_dims: usize,
    #[serde(default)]
    pub default_top_k: usize,
    #[serde(default)]
    pub snippet_max_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            embedding_backend: "hash".to_string(),
            embedding_dims: 384,
            default_top_k: DEFAULT_TOP_K,
            snippet_max_chars: DEFAULT_SNIPPET_CHARS,
        }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.embedding_backend {
            self.embedding_backend = value;
        }
        if let Some(value) = patch.embedding_dims {
            self.embedding_dims = value;
        }
        if let Some(value) = patch.default_top_k {
            self.default_top_k = value;
        }
        if let Some(value) = patch.snippet_max_chars {
            self.snippet_max_chars = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub query_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            query_capacity: DEFAULT_QUERY_CACHE_SIZE,
        }
    }
}

impl CacheConfig {
    fn merge(&mut self, patch: CachePatch) {
        if let Some(value) = patch.enabled {
            self.enabled = value;
        }
        if let Some(value) = patch.query_capacity {
            self.query_capacity = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub paths: Option<PathsPatch>,
    pub search: Option<SearchPatch>,
    pub cache: Option<CachePatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PathsPatch {
    pub concepts: Option<PathBuf>,
    pub documents: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub embedding_backend: Option<String>,
    pub embedding_dims: Option<usize>,
    pub default_top_k: Option<usize>,
    pub snippet_max_chars: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CachePatch {
    pub enabled: Option<bool>,
    pub query_capacity: Option<usize>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<usize>().map(Some).map_err(|err| {
            SemError::Configuration(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}
