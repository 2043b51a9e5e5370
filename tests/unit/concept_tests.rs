use semlayer::SemError;
use semlayer::concepts::{Concept, ConceptStore};
use semlayer::test_utils::{TestCase, run_table_tests};

const VOCABULARY: &str = r"
concepts:
  - id: onboarding
    name: Employee Onboarding
    synonyms: [new hire, orientation]
    related_to: [benefits]
  - id: benefits
    name: Employee Benefits
    synonyms: [health insurance, dental, '']
  - id: expenses
    name: Expense Reports
    synonyms: [reimbursement]
";

fn store() -> ConceptStore {
    ConceptStore::from_yaml_str(VOCABULARY).unwrap()
}

#[test]
fn concept_matching_table() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "synonym_case_insensitive",
            input: "What does HEALTH INSURANCE cover?",
            expected: vec!["benefits".to_string()],
            should_panic: false,
        },
        TestCase {
            name: "definition_order_not_text_order",
            input: "reimbursement for my new hire laptop",
            expected: vec!["onboarding".to_string(), "expenses".to_string()],
            should_panic: false,
        },
        TestCase {
            name: "full_name_required",
            input: "employee benefits enrollment",
            expected: vec!["benefits".to_string()],
            should_panic: false,
        },
        TestCase {
            name: "partial_name_does_not_match",
            input: "benefits",
            expected: Vec::new(),
            should_panic: false,
        },
        TestCase {
            name: "empty_text",
            input: "",
            expected: Vec::new(),
            should_panic: false,
        },
    ];

    let store = store();
    run_table_tests(cases, |text| store.match_text(text))?;
    Ok(())
}

#[test]
fn related_concepts_resolve_known_ids() {
    let store = store();
    let related: Vec<&str> = store
        .related("onboarding")
        .iter()
        .map(|concept| concept.id.as_str())
        .collect();
    assert_eq!(related, vec!["benefits"]);
    assert!(store.related("missing").is_empty());
}

#[test]
fn lookup_by_id() {
    let store = store();
    assert_eq!(store.len(), 3);
    assert_eq!(store.get("expenses").unwrap().name, "Expense Reports");
    assert!(store.get("payroll").is_none());
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = ConceptStore::from_concepts(vec![
        Concept::new("a", "Alpha"),
        Concept::new("a", "Another Alpha"),
    ])
    .unwrap_err();
    assert!(matches!(err, SemError::Configuration(_)));
}

#[test]
fn missing_concepts_key_is_configuration_error() {
    let err = ConceptStore::from_yaml_str("terms:\n  - id: a\n").unwrap_err();
    assert_eq!(err.code(), "configuration_error");
}
