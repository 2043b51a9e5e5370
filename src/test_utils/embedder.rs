//! Scriptable embedding provider for pipeline tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Result, SemError};
use crate::search::embeddings::{EmbeddingProvider, HashEmbedder};

/// Shared call counter handed out before the embedder is boxed.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    #[must_use]
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Returns fixed vectors for known texts and hash embeddings otherwise.
pub struct FixedEmbedder {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
    fallback: HashEmbedder,
    fail: bool,
    batch_calls: CallCounter,
    single_calls: CallCounter,
}

impl FixedEmbedder {
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: HashMap::new(),
            fallback: HashEmbedder::new(dim),
            fail: false,
            batch_calls: CallCounter::default(),
            single_calls: CallCounter::default(),
        }
    }

    /// Pin the vector returned for `text`.
    #[must_use]
    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }

    /// Make every call fail with a provider error.
    #[must_use]
    pub const fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    #[must_use]
    pub fn batch_calls(&self) -> CallCounter {
        self.batch_calls.clone()
    }

    #[must_use]
    pub fn single_calls(&self) -> CallCounter {
        self.single_calls.clone()
    }

    fn lookup(&self, text: &str) -> Result<Vec<f32>> {
        if self.fail {
            return Err(SemError::Provider("scripted failure".to_string()));
        }
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.fallback.embed(text)))
    }
}

impl EmbeddingProvider for FixedEmbedder {
    fn id(&self) -> &str {
        "fixed"
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.single_calls.bump();
        if text.is_empty() {
            return Err(SemError::InvalidInput("query cannot be empty".to_string()));
        }
        self.lookup(text)
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.batch_calls.bump();
        texts.iter().map(|text| self.lookup(text)).collect()
    }
}
