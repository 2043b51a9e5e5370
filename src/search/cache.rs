//! LRU cache for query embeddings.
//!
//! Repeated queries skip the embedding provider. Cached vectors are exactly
//! what the provider returned, so results are unaffected by caching.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

/// Default cache size for query embeddings (number of distinct queries)
pub const DEFAULT_QUERY_CACHE_SIZE: usize = 128;

/// Cache statistics for monitoring and tuning.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe query-text -> embedding cache.
///
/// All operations use try-lock; a contended cache behaves like a miss.
pub struct QueryEmbeddingCache {
    entries: Mutex<LruCache<String, Vec<f32>>>,
    stats: Mutex<CacheStats>,
}

impl Default for QueryEmbeddingCache {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_CACHE_SIZE)
    }
}

impl QueryEmbeddingCache {
    /// A capacity of zero is bumped to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
            )),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    pub fn get(&self, query: &str) -> Option<Vec<f32>> {
        let mut cache = self.entries.try_lock().ok()?;
        let hit = cache.get(query).cloned();
        if let Ok(mut stats) = self.stats.try_lock() {
            if hit.is_some() {
                stats.hits += 1;
            } else {
                stats.misses += 1;
            }
        }
        hit
    }

    /// Silently skipped if the cache is locked.
    pub fn put(&self, query: &str, embedding: Vec<f32>) {
        if let Ok(mut cache) = self.entries.try_lock() {
            cache.put(query.to_string(), embedding);
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
            .try_lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.try_lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
