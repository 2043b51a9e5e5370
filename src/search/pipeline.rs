//! Retrieval pipeline
//!
//! Lifecycle is `Uninitialized -> Ready`, one-way. [`RetrievalPipeline::initialize`]
//! loads, tags and embeds the corpus exactly once; afterwards the corpus is a
//! read-only snapshot and [`RetrievalPipeline::query`] may run concurrently.
//!
//! A query narrows the corpus to documents sharing a concept with the query
//! text (or keeps everything when no concept matches), ranks the candidates by
//! embedding similarity and returns the top results with snippets. Concept
//! matches only filter; they never influence the score.

use std::collections::HashSet;
use std::sync::OnceLock;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::concepts::ConceptStore;
use crate::documents::{DocumentSource, TaggedDocument, tag_all};
use crate::error::{Result, SemError};

use super::cache::QueryEmbeddingCache;
use super::embeddings::EmbeddingProvider;
use super::ranker::rank;
use super::snippet::{self, DEFAULT_SNIPPET_CHARS};

/// Largest `top_k` accepted at the request boundary.
pub const MAX_TOP_K: usize = 20;

/// Default number of results.
pub const DEFAULT_TOP_K: usize = 5;

/// One ranked document returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub doc_id: String,
    pub title: String,
    pub matched_concepts: Vec<String>,
    /// Cosine similarity clamped to `[0, 1]`.
    pub score: f32,
    pub snippet: String,
}

/// A validated query from an outer surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub query: String,
    pub top_k: usize,
}

impl QueryRequest {
    /// `query` must be non-empty and `top_k` within `1..=MAX_TOP_K`.
    pub fn new(query: impl Into<String>, top_k: usize) -> Result<Self> {
        let query = query.into();
        if query.is_empty() {
            return Err(SemError::InvalidInput("query cannot be empty".to_string()));
        }
        if !(1..=MAX_TOP_K).contains(&top_k) {
            return Err(SemError::InvalidInput(format!(
                "top_k must be between 1 and {MAX_TOP_K}, got {top_k}"
            )));
        }
        Ok(Self { query, top_k })
    }
}

/// Health/status summary of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStatus {
    pub ready: bool,
    pub documents: usize,
    pub concepts: usize,
    pub embedder: String,
    pub dimension: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub snippet_max_chars: usize,
    /// `None` disables the query embedding cache.
    pub query_cache_capacity: Option<usize>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            snippet_max_chars: DEFAULT_SNIPPET_CHARS,
            query_cache_capacity: None,
        }
    }
}

/// The embedded document collection. Every document carries an embedding.
struct Corpus {
    documents: Vec<TaggedDocument>,
}

impl Corpus {
    fn embed(tagged: Vec<TaggedDocument>, embedder: &dyn EmbeddingProvider) -> Result<Self> {
        let texts: Vec<String> = tagged.iter().map(|doc| doc.document.embedding_text()).collect();
        let vectors = embedder.embed_batch(&texts)?;
        if vectors.len() != tagged.len() {
            return Err(SemError::Provider(format!(
                "{} returned {} embeddings for {} documents",
                embedder.id(),
                vectors.len(),
                tagged.len()
            )));
        }

        let dimension = embedder.dimension();
        let documents = tagged
            .into_iter()
            .zip(vectors)
            .map(|(doc, vector)| {
                check_dimension(embedder, &vector, dimension)?;
                Ok(doc.with_embedding(vector))
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            target: "pipeline",
            documents = documents.len(),
            dimension,
            embedder = embedder.id(),
            "embeddings generated"
        );
        Ok(Self { documents })
    }
}

/// Concept-filtered, embedding-ranked retrieval over an in-memory corpus.
pub struct RetrievalPipeline {
    concepts: ConceptStore,
    source: Box<dyn DocumentSource>,
    embedder: Box<dyn EmbeddingProvider>,
    options: PipelineOptions,
    cache: Option<QueryEmbeddingCache>,
    corpus: OnceLock<Corpus>,
    init_guard: Mutex<()>,
}

impl RetrievalPipeline {
    pub fn new(
        concepts: ConceptStore,
        source: impl DocumentSource + 'static,
        embedder: Box<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            concepts,
            source: Box::new(source),
            embedder,
            options: PipelineOptions::default(),
            cache: None,
            corpus: OnceLock::new(),
            init_guard: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.cache = options.query_cache_capacity.map(QueryEmbeddingCache::new);
        self.options = options;
        self
    }

    /// Load, tag and embed the corpus. A second call is a logged no-op.
    pub fn initialize(&self) -> Result<()> {
        let _guard = self.init_guard.lock();
        if self.corpus.get().is_some() {
            info!(target: "pipeline", "pipeline already initialized");
            return Ok(());
        }

        info!(target: "pipeline", "initializing retrieval pipeline");
        let raw = self.source.load_documents()?;
        if raw.is_empty() {
            return Err(SemError::Configuration(
                "document source supplied no documents".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(raw.len());
        if let Some(dup) = raw.iter().find(|doc| !seen.insert(doc.doc_id.as_str())) {
            return Err(SemError::Configuration(format!(
                "duplicate doc_id from document source: {}",
                dup.doc_id
            )));
        }

        let tagged = tag_all(&raw, &self.concepts);
        for doc in &tagged {
            debug!(
                target: "pipeline",
                doc_id = doc.doc_id(),
                concepts = doc.matched_concepts.len(),
                "tagged document"
            );
        }

        let corpus = Corpus::embed(tagged, self.embedder.as_ref())?;
        let count = corpus.documents.len();
        // Only reachable while holding init_guard with the cell empty.
        let _ = self.corpus.set(corpus);
        info!(target: "pipeline", documents = count, "pipeline initialized");
        Ok(())
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.corpus.get().is_some()
    }

    /// Retrieve up to `top_k` documents for `text`, best first.
    pub fn query(&self, text: &str, top_k: usize) -> Result<Vec<QueryResult>> {
        let corpus = self.corpus.get().ok_or(SemError::NotReady)?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let matched = self.concepts.match_text(text);
        let candidates: Vec<&TaggedDocument> = if matched.is_empty() {
            debug!(
                target: "pipeline",
                documents = corpus.documents.len(),
                "no concept match, searching all documents"
            );
            corpus.documents.iter().collect()
        } else {
            let filtered: Vec<&TaggedDocument> = corpus
                .documents
                .iter()
                .filter(|doc| doc.has_any_concept(&matched))
                .collect();
            debug!(
                target: "pipeline",
                matched = ?matched,
                candidates = filtered.len(),
                "filtered by concepts"
            );
            filtered
        };

        if candidates.is_empty() {
            debug!(target: "pipeline", "no candidate documents");
            return Ok(Vec::new());
        }

        let query_vector = self.embed_query(text)?;
        let results: Vec<QueryResult> = rank(&query_vector, candidates)
            .into_iter()
            .take(top_k)
            .map(|(doc, score)| QueryResult {
                doc_id: doc.doc_id().to_string(),
                title: doc.title().to_string(),
                matched_concepts: doc.matched_concepts.clone(),
                score: score.clamp(0.0, 1.0),
                snippet: snippet::extract(doc.content(), self.options.snippet_max_chars),
            })
            .collect();

        info!(target: "pipeline", results = results.len(), "query complete");
        Ok(results)
    }

    pub fn query_request(&self, request: &QueryRequest) -> Result<Vec<QueryResult>> {
        self.query(&request.query, request.top_k)
    }

    /// The tagged, embedded corpus.
    pub fn documents(&self) -> Result<&[TaggedDocument]> {
        self.corpus
            .get()
            .map(|corpus| corpus.documents.as_slice())
            .ok_or(SemError::NotReady)
    }

    #[must_use]
    pub const fn concepts(&self) -> &ConceptStore {
        &self.concepts
    }

    #[must_use]
    pub fn match_concepts(&self, text: &str) -> Vec<String> {
        self.concepts.match_text(text)
    }

    #[must_use]
    pub fn status(&self) -> PipelineStatus {
        PipelineStatus {
            ready: self.is_ready(),
            documents: self.corpus.get().map_or(0, |c| c.documents.len()),
            concepts: self.concepts.len(),
            embedder: self.embedder.id().to_string(),
            dimension: self.embedder.dimension(),
        }
    }

    #[must_use]
    pub const fn cache(&self) -> Option<&QueryEmbeddingCache> {
        self.cache.as_ref()
    }

    fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        if let Some(cache) = &self.cache {
            let hit = cache.get(text);
            let stats = cache.stats();
            debug!(
                target: "pipeline",
                hit = hit.is_some(),
                hits = stats.hits,
                misses = stats.misses,
                hit_rate = stats.hit_rate(),
                "query embedding cache"
            );
            if let Some(vector) = hit {
                return Ok(vector);
            }
        }
        let vector = self.embedder.embed_one(text)?;
        check_dimension(self.embedder.as_ref(), &vector, self.embedder.dimension())?;
        if let Some(cache) = &self.cache {
            cache.put(text, vector.clone());
        }
        Ok(vector)
    }
}

fn check_dimension(embedder: &dyn EmbeddingProvider, vector: &[f32], expected: usize) -> Result<()> {
    if vector.len() == expected {
        Ok(())
    } else {
        Err(SemError::Provider(format!(
            "{} returned a {}-dim vector, expected {expected}",
            embedder.id(),
            vector.len()
        )))
    }
}
