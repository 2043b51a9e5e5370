//! Retrieval engine
//!
//! Concept filtering + embedding similarity ranking + snippet extraction.

pub mod cache;
pub mod embeddings;
pub mod pipeline;
pub mod ranker;
pub mod snippet;

pub use embeddings::{EmbeddingProvider, HashEmbedder, provider_for_backend};
pub use pipeline::{
    DEFAULT_TOP_K, MAX_TOP_K, PipelineOptions, PipelineStatus, QueryRequest, QueryResult,
    RetrievalPipeline,
};
pub use ranker::{cosine_similarity, rank};
