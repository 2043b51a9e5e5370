//! semlayer status

use clap::Args;
use tracing::warn;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputMode, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Report without loading and embedding documents
    #[arg(long)]
    pub no_init: bool,
}

pub fn run(ctx: &AppContext, args: &StatusArgs) -> Result<()> {
    if !args.no_init {
        if let Err(err) = ctx.pipeline.initialize() {
            warn!(target: "status", error = %err, "pipeline failed to initialize");
        }
    }
    let status = ctx.pipeline.status();

    match ctx.output_mode {
        OutputMode::Robot => emit_robot(&robot_ok(serde_json::json!({
            "pipeline": status,
            "paths": ctx.config.paths,
            "project_root": ctx.project_root,
        }))),
        OutputMode::Human => {
            let mut layout = HumanLayout::new();
            layout
                .title("semlayer status")
                .kv("Ready", if status.ready { "yes" } else { "no" })
                .kv("Documents", &status.documents.to_string())
                .kv("Concepts", &status.concepts.to_string())
                .kv("Embedder", &status.embedder)
                .kv("Dimension", &status.dimension.to_string())
                .kv("Concepts file", &ctx.config.paths.concepts.display().to_string())
                .kv("Documents dir", &ctx.config.paths.documents.display().to_string());
            emit_human(layout);
            Ok(())
        }
    }
}
