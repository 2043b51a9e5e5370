use proptest::prelude::*;

use semlayer::concepts::ConceptStore;
use semlayer::documents::{Document, tag};
use semlayer::search::HashEmbedder;
use semlayer::search::snippet::extract;

const CONCEPTS: &str = r"
concepts:
  - id: benefits
    name: Employee Benefits
    synonyms: [health insurance, dental]
  - id: expenses
    name: Expense Reports
    synonyms: [receipts]
";

proptest! {
    #[test]
    fn test_hash_embedding_deterministic(text in ".*") {
        let embedder = HashEmbedder::new(64);
        prop_assert_eq!(embedder.embed(&text), embedder.embed(&text));
    }

    #[test]
    fn test_hash_embedding_length(text in ".*", dim in 1usize..256usize) {
        let embedder = HashEmbedder::new(dim);
        prop_assert_eq!(embedder.embed(&text).len(), dim);
    }

    #[test]
    fn test_tagging_deterministic_and_ordered(title in "[a-zA-Z ]{0,20}", body in ".{0,120}") {
        let store = ConceptStore::from_yaml_str(CONCEPTS).unwrap();
        let document = Document::new("doc", title, body);
        let first = tag(&document, &store);
        let second = tag(&document, &store);
        prop_assert_eq!(&first.matched_concepts, &second.matched_concepts);

        let order: Vec<usize> = first
            .matched_concepts
            .iter()
            .map(|id| store.concepts().iter().position(|c| &c.id == id).unwrap())
            .collect();
        prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_snippet_identity_when_short(content in ".{0,50}") {
        prop_assert_eq!(extract(&content, 50), content);
    }

    #[test]
    fn test_snippet_bounded(content in ".{0,400}", max in 1usize..200usize) {
        let snippet = extract(&content, max);
        prop_assert!(snippet.chars().count() <= max + 3);
    }
}
