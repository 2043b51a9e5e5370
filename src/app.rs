use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::{Cli, OutputMode};
use crate::concepts::ConceptStore;
use crate::config::Config;
use crate::documents::MarkdownDirectory;
use crate::error::Result;
use crate::search::{PipelineOptions, RetrievalPipeline, provider_for_backend};

pub struct AppContext {
    pub project_root: PathBuf,
    pub config: Config,
    pub pipeline: RetrievalPipeline,
    pub output_mode: OutputMode,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let project_root = std::env::current_dir()?;
        let config = Config::load(cli.config.as_deref(), &project_root)?;
        let pipeline = build_pipeline(&config, &project_root)?;

        Ok(Self {
            project_root,
            config,
            pipeline,
            output_mode: cli.output_mode(),
        })
    }
}

/// Wire concepts, document source and embedder from configuration.
///
/// The pipeline is returned uninitialized; documents are embedded on the
/// first call that needs them.
pub fn build_pipeline(config: &Config, project_root: &Path) -> Result<RetrievalPipeline> {
    let concepts_path = resolve(project_root, &config.paths.concepts);
    let documents_dir = resolve(project_root, &config.paths.documents);
    debug!(
        target: "app",
        concepts = %concepts_path.display(),
        documents = %documents_dir.display(),
        "building pipeline"
    );

    let concepts = ConceptStore::load(&concepts_path)?;
    let source = MarkdownDirectory::open(&documents_dir)?;
    let embedder =
        provider_for_backend(&config.search.embedding_backend, config.search.embedding_dims)?;

    Ok(RetrievalPipeline::new(concepts, source, embedder).with_options(PipelineOptions {
        snippet_max_chars: config.search.snippet_max_chars,
        query_cache_capacity: config.query_cache_capacity(),
    }))
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
