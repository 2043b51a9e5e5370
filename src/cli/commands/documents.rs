//! semlayer documents - list the tagged corpus

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputMode, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct DocumentsArgs {
    /// Only show documents tagged with this concept id
    #[arg(long)]
    pub concept: Option<String>,
}

#[derive(Serialize)]
struct DocumentEntry<'a> {
    doc_id: &'a str,
    title: &'a str,
    matched_concepts: &'a [String],
}

pub fn run(ctx: &AppContext, args: &DocumentsArgs) -> Result<()> {
    ctx.pipeline.initialize()?;
    let entries: Vec<DocumentEntry<'_>> = ctx
        .pipeline
        .documents()?
        .iter()
        .filter(|doc| {
            args.concept
                .as_ref()
                .is_none_or(|id| doc.matched_concepts.contains(id))
        })
        .map(|doc| DocumentEntry {
            doc_id: doc.doc_id(),
            title: doc.title(),
            matched_concepts: &doc.matched_concepts,
        })
        .collect();

    match ctx.output_mode {
        OutputMode::Robot => emit_robot(&robot_ok(serde_json::json!({
            "count": entries.len(),
            "documents": entries,
        }))),
        OutputMode::Human => {
            let mut layout = HumanLayout::new();
            layout.title(&format!("Documents ({})", entries.len()));
            for entry in &entries {
                let tags = if entry.matched_concepts.is_empty() {
                    "untagged".to_string()
                } else {
                    entry.matched_concepts.join(", ")
                };
                layout.bullet(&format!("{} [{}] {}", entry.title, entry.doc_id, tags));
            }
            emit_human(layout);
            Ok(())
        }
    }
}
