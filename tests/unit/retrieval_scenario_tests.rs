use semlayer::SemError;
use semlayer::concepts::ConceptStore;
use semlayer::documents::Document;
use semlayer::search::{HashEmbedder, PipelineOptions, QueryRequest, RetrievalPipeline};
use semlayer::test_utils::embedder::FixedEmbedder;

const CONCEPTS: &str = r"
concepts:
  - id: benefits
    name: Employee Benefits
    synonyms: [health insurance, dental]
  - id: expenses
    name: Expense Reports
    synonyms: [reimbursement, receipts]
  - id: security
    name: Security Incidents
    synonyms: [phishing]
";

fn concepts() -> ConceptStore {
    ConceptStore::from_yaml_str(CONCEPTS).unwrap()
}

fn doc(id: &str, title: &str, content: &str) -> Document {
    Document::new(id, title, content)
}

#[test]
fn concept_filter_beats_raw_similarity() {
    let documents = vec![
        doc("benefits-guide", "Benefits Guide", "Health insurance enrollment opens in May."),
        doc("parking", "Parking", "Parking passes renew yearly."),
    ];
    // The parking document is a perfect vector match but shares no concept.
    let embedder = FixedEmbedder::new(2)
        .with("Benefits Guide. Health insurance enrollment opens in May.", vec![0.0, 1.0])
        .with("Parking. Parking passes renew yearly.", vec![1.0, 0.0])
        .with("health insurance parking", vec![1.0, 0.0]);

    let pipeline = RetrievalPipeline::new(concepts(), documents, Box::new(embedder));
    pipeline.initialize().unwrap();

    let results = pipeline.query("health insurance parking", 5).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].doc_id, "benefits-guide");
    assert_eq!(results[0].matched_concepts, vec!["benefits".to_string()]);
    assert!(results[0].score.abs() < f32::EPSILON);
}

#[test]
fn top_k_limits_ranked_candidates() {
    let documents: Vec<Document> = (0u8..5)
        .map(|i| {
            doc(
                &format!("receipts-{i}"),
                &format!("Receipts {i}"),
                "Attach receipts to every expense.",
            )
        })
        .collect();
    let mut embedder = FixedEmbedder::new(2).with("where do receipts go", vec![1.0, 0.0]);
    for i in 0u8..5 {
        let angle = f32::from(i) * 0.3;
        embedder = embedder.with(
            &format!("Receipts {i}. Attach receipts to every expense."),
            vec![angle.cos(), angle.sin()],
        );
    }

    let pipeline = RetrievalPipeline::new(concepts(), documents, Box::new(embedder));
    pipeline.initialize().unwrap();

    let request = QueryRequest::new("where do receipts go", 2).unwrap();
    let results = pipeline.query_request(&request).unwrap();
    let ids: Vec<&str> = results.iter().map(|r| r.doc_id.as_str()).collect();
    assert_eq!(ids, vec!["receipts-0", "receipts-1"]);
    assert!(results[0].score >= results[1].score);
}

#[test]
fn unmatched_query_searches_whole_corpus() {
    let documents = vec![
        doc("a", "Dental Plan", "Dental cleanings are covered twice a year."),
        doc("b", "Phishing", "Report phishing emails to the security desk."),
        doc("c", "Holidays", "The office closes for public holidays."),
    ];
    let pipeline = RetrievalPipeline::new(
        concepts(),
        documents,
        Box::new(HashEmbedder::new(384)),
    );
    pipeline.initialize().unwrap();

    let results = pipeline.query("office holidays", 5).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].doc_id, "c");
    for result in &results {
        assert!((0.0..=1.0).contains(&result.score));
    }
}

#[test]
fn matched_concept_without_documents_returns_nothing() {
    let documents = vec![doc("a", "Dental Plan", "Dental cleanings are covered.")];
    let pipeline = RetrievalPipeline::new(
        concepts(),
        documents,
        Box::new(HashEmbedder::new(32)),
    );
    pipeline.initialize().unwrap();

    assert!(pipeline.query("how do I report phishing", 5).unwrap().is_empty());
}

#[test]
fn query_before_initialize_is_not_ready() {
    let pipeline = RetrievalPipeline::new(
        concepts(),
        vec![doc("a", "A", "text")],
        Box::new(HashEmbedder::new(16)),
    );
    let err = pipeline.query("dental", 5).unwrap_err();
    assert!(matches!(err, SemError::NotReady));
    assert_eq!(err.code(), "not_ready");
}

#[test]
fn snippets_respect_configured_length() {
    let long_body = "Expense reports are due monthly. ".repeat(20);
    let pipeline = RetrievalPipeline::new(
        concepts(),
        vec![doc("exp", "Expense Reports", &long_body)],
        Box::new(HashEmbedder::new(32)),
    )
    .with_options(PipelineOptions {
        snippet_max_chars: 50,
        query_cache_capacity: Some(8),
    });
    pipeline.initialize().unwrap();

    let results = pipeline.query("reimbursement timeline", 1).unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].snippet.chars().count() <= 53);
    assert!(results[0].snippet.starts_with("Expense reports are due monthly."));
}

#[test]
fn cached_query_returns_identical_results() {
    let pipeline = RetrievalPipeline::new(
        concepts(),
        vec![
            doc("a", "Dental", "Dental coverage details."),
            doc("b", "Health", "Health insurance premiums."),
        ],
        Box::new(HashEmbedder::new(64)),
    )
    .with_options(PipelineOptions {
        query_cache_capacity: Some(4),
        ..PipelineOptions::default()
    });
    pipeline.initialize().unwrap();

    let first = pipeline.query("dental and health insurance", 5).unwrap();
    let second = pipeline.query("dental and health insurance", 5).unwrap();
    assert_eq!(first, second);

    let stats = pipeline.cache().unwrap().stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}
