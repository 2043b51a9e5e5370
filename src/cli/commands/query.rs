//! semlayer query - ranked retrieval for one question

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputMode, emit_human, emit_robot, robot_ok};
use crate::error::Result;
use crate::search::{QueryRequest, QueryResult};

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Natural-language question
    pub text: String,

    /// Number of results (1-20); defaults to search.default_top_k
    #[arg(long, short = 'k')]
    pub top_k: Option<usize>,
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    query: &'a str,
    top_k: usize,
    matched_concepts: Vec<String>,
    results: Vec<QueryResult>,
}

pub fn run(ctx: &AppContext, args: &QueryArgs) -> Result<()> {
    let top_k = args.top_k.unwrap_or(ctx.config.search.default_top_k);
    let request = QueryRequest::new(args.text.as_str(), top_k)?;
    debug!(target: "query", top_k = request.top_k, "query request validated");

    ctx.pipeline.initialize()?;
    let matched_concepts = ctx.pipeline.match_concepts(&request.query);
    let results = ctx.pipeline.query_request(&request)?;

    match ctx.output_mode {
        OutputMode::Robot => emit_robot(&robot_ok(QueryOutput {
            query: &request.query,
            top_k: request.top_k,
            matched_concepts,
            results,
        })),
        OutputMode::Human => {
            emit_human(render(&request, &matched_concepts, &results));
            Ok(())
        }
    }
}

fn render(request: &QueryRequest, matched: &[String], results: &[QueryResult]) -> HumanLayout {
    let mut layout = HumanLayout::new();
    layout.title(&format!("Results for \"{}\"", request.query));

    let concepts = if matched.is_empty() {
        "(none, searching all documents)".to_string()
    } else {
        matched.join(", ")
    };
    layout.kv("Concepts", &concepts).blank();

    if results.is_empty() {
        layout.push_line("No documents found.");
        return layout;
    }

    for (position, result) in results.iter().enumerate() {
        layout.section(&format!(
            "{}. {} [{}]",
            position + 1,
            result.title,
            result.doc_id
        ));
        layout.kv("Score", &format!("{:.4}", result.score));
        if !result.matched_concepts.is_empty() {
            layout.kv("Tags", &result.matched_concepts.join(", "));
        }
        layout.push_line(result.snippet.clone()).blank();
    }
    layout
}
