//! CLI command implementations
//!
//! Each subcommand has its own module with an Args struct and a `run()`.

use clap::Subcommand;

pub mod concepts;
pub mod documents;
pub mod query;
pub mod status;

use crate::app::AppContext;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Query(args) => query::run(ctx, args),
        Commands::Concepts(args) => concepts::run(ctx, args),
        Commands::Documents(args) => documents::run(ctx, args),
        Commands::Status(args) => status::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Retrieve the documents most relevant to a question
    Query(query::QueryArgs),

    /// List the concept vocabulary
    Concepts(concepts::ConceptsArgs),

    /// List loaded documents and their concept tags
    Documents(documents::DocumentsArgs),

    /// Show pipeline readiness and corpus counts
    Status(status::StatusArgs),
}
