//! semlayer concepts - inspect the concept vocabulary

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputMode, emit_human, emit_robot, robot_ok};
use crate::concepts::{Concept, ConceptStore};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ConceptsArgs {
    /// Only show concepts that match this text
    #[arg(long, short)]
    pub matching: Option<String>,
}

#[derive(Serialize)]
struct ConceptEntry<'a> {
    id: &'a str,
    name: &'a str,
    synonyms: &'a [String],
    /// Resolved `related_to` ids; unknown ids are dropped.
    related: Vec<&'a str>,
}

impl<'a> ConceptEntry<'a> {
    fn new(concept: &'a Concept, store: &'a ConceptStore) -> Self {
        Self {
            id: &concept.id,
            name: &concept.name,
            synonyms: &concept.synonyms,
            related: store
                .related(&concept.id)
                .into_iter()
                .map(|related| related.id.as_str())
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct ConceptsOutput<'a> {
    count: usize,
    concepts: Vec<ConceptEntry<'a>>,
}

pub fn run(ctx: &AppContext, args: &ConceptsArgs) -> Result<()> {
    let store = ctx.pipeline.concepts();
    let concepts: Vec<&Concept> = match &args.matching {
        Some(text) => store
            .match_text(text)
            .iter()
            .filter_map(|id| store.get(id))
            .collect(),
        None => store.concepts().iter().collect(),
    };
    let entries: Vec<ConceptEntry<'_>> = concepts
        .into_iter()
        .map(|concept| ConceptEntry::new(concept, store))
        .collect();

    match ctx.output_mode {
        OutputMode::Robot => emit_robot(&robot_ok(ConceptsOutput {
            count: entries.len(),
            concepts: entries,
        })),
        OutputMode::Human => {
            let mut layout = HumanLayout::new();
            layout.title(&format!("Concepts ({})", entries.len()));
            for entry in &entries {
                layout.section(&format!("{} ({})", entry.name, entry.id));
                if !entry.synonyms.is_empty() {
                    layout.kv("Synonyms", &entry.synonyms.join(", "));
                }
                if !entry.related.is_empty() {
                    layout.kv("Related", &entry.related.join(", "));
                }
                layout.blank();
            }
            emit_human(layout);
            Ok(())
        }
    }
}
