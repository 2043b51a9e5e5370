//! Embedding providers
//!
//! [`EmbeddingProvider`] is the seam the pipeline embeds through. The built-in
//! [`HashEmbedder`] implements FNV-1a feature hashing: no model files, fully
//! deterministic, unit-normalized output.

use std::collections::HashMap;

use crate::error::{Result, SemError};

/// Maps text to fixed-dimension vectors.
///
/// Dimensionality must not change over the provider's lifetime.
pub trait EmbeddingProvider: Send + Sync {
    fn id(&self) -> &str;

    fn dimension(&self) -> usize;

    /// Embed a single text. Empty text is [`SemError::InvalidInput`].
    fn embed_one(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed many texts; one vector per input, same order.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Hash embedder using FNV-1a
pub struct HashEmbedder {
    /// Embedding dimension (default: 384)
    dim: usize,
    id: String,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(384)
    }
}

impl HashEmbedder {
    /// Create embedder with specified dimension
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            id: format!("fnv1a-{dim}"),
        }
    }

    /// Embed text into vector. Text with no tokens embeds to all zeros.
    #[must_use]
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dim];
        if self.dim == 0 {
            return vector;
        }

        let tokens = tokenize(text);
        if tokens.is_empty() {
            return vector;
        }

        let mut counts: HashMap<&str, f32> = HashMap::new();
        for token in &tokens {
            *counts.entry(token.as_str()).or_default() += 1.0;
        }

        #[allow(clippy::cast_precision_loss)]
        let total = tokens.len() as f32;
        for (term, count) in counts {
            vector[bucket(term, self.dim)] += count / total;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

impl EmbeddingProvider for HashEmbedder {
    fn id(&self) -> &str {
        &self.id
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        if text.is_empty() {
            return Err(SemError::InvalidInput("query cannot be empty".to_string()));
        }
        Ok(self.embed(text))
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed(text)).collect())
    }
}

/// Build the provider named by `backend`.
pub fn provider_for_backend(backend: &str, dims: usize) -> Result<Box<dyn EmbeddingProvider>> {
    match backend.to_lowercase().as_str() {
        "hash" | "fnv1a" => Ok(Box::new(HashEmbedder::new(dims))),
        other => Err(SemError::Configuration(format!(
            "unknown embedding backend {other} (expected hash)"
        ))),
    }
}

/// Lowercase alphanumeric tokens of at least two characters.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn bucket(term: &str, dims: usize) -> usize {
    let mut hash = FNV_OFFSET;
    for byte in term.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    (hash % dims as u64) as usize
}
