use semlayer::SemError;
use semlayer::documents::{DocumentSource, MarkdownDirectory};
use semlayer::test_utils::fixtures::UnitTestFixture;

#[test]
fn loads_markdown_in_file_name_order() {
    let fixture = UnitTestFixture::new();
    fixture.create_document("b.md", "second", "Second", "Body two.");
    fixture.create_document("a.md", "first", "First", "Body one.");
    fixture.create_file("documents/notes.txt", "ignored");

    let source = MarkdownDirectory::open(fixture.documents_dir()).unwrap();
    let documents = source.load_documents().unwrap();

    let ids: Vec<&str> = documents.iter().map(|doc| doc.doc_id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second"]);
    assert_eq!(documents[0].title, "First");
    assert!(documents[0].content.contains("Body one."));
}

#[test]
fn file_without_frontmatter_uses_stem() {
    let fixture = UnitTestFixture::new();
    fixture.create_file("documents/expense-policy.md", "Submit receipts within 30 days.\n");

    let source = MarkdownDirectory::open(fixture.documents_dir()).unwrap();
    let documents = source.load_documents().unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].doc_id, "expense-policy");
    assert_eq!(documents[0].title, "Expense Policy");
}

#[test]
fn duplicate_doc_ids_keep_first() {
    let fixture = UnitTestFixture::new();
    fixture.create_document("a.md", "same", "Original", "first");
    fixture.create_document("b.md", "same", "Copy", "second");

    let source = MarkdownDirectory::open(fixture.documents_dir()).unwrap();
    let documents = source.load_documents().unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].title, "Original");
}

#[test]
fn missing_directory_is_configuration_error() {
    let fixture = UnitTestFixture::new();
    let err = MarkdownDirectory::open(fixture.data_path.join("nowhere")).unwrap_err();
    assert!(matches!(err, SemError::Configuration(_)));
}

#[test]
fn empty_directory_is_configuration_error() {
    let fixture = UnitTestFixture::new();
    std::fs::create_dir_all(fixture.documents_dir()).unwrap();
    let source = MarkdownDirectory::open(fixture.documents_dir()).unwrap();
    let err = source.load_documents().unwrap_err();
    assert!(matches!(err, SemError::Configuration(_)));
}
