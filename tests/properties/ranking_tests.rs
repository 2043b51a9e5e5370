use proptest::prelude::*;

use semlayer::documents::{Document, EmbeddingState, TaggedDocument};
use semlayer::search::{cosine_similarity, rank};

fn tagged(id: usize, vector: Vec<f32>) -> TaggedDocument {
    TaggedDocument {
        document: Document::new(id.to_string(), "t", "c"),
        matched_concepts: Vec::new(),
        embedding: EmbeddingState::Embedded(vector),
    }
}

proptest! {
    #[test]
    fn test_cosine_bounded_and_symmetric(
        a in prop::collection::vec(-10.0f32..10.0, 8),
        b in prop::collection::vec(-10.0f32..10.0, 8),
    ) {
        let ab = cosine_similarity(&a, &b);
        let ba = cosine_similarity(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-5);
        prop_assert!((-1.0001..=1.0001).contains(&ab));
    }

    #[test]
    fn test_rank_sorted_and_complete(
        query in prop::collection::vec(-1.0f32..1.0, 4),
        vectors in prop::collection::vec(prop::collection::vec(-1.0f32..1.0, 4), 0..12),
    ) {
        let docs: Vec<TaggedDocument> = vectors
            .into_iter()
            .enumerate()
            .map(|(i, v)| tagged(i, v))
            .collect();
        let ranked = rank(&query, &docs);

        prop_assert_eq!(ranked.len(), docs.len());
        prop_assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_rank_ties_keep_input_order(count in 1usize..10) {
        let docs: Vec<TaggedDocument> = (0..count).map(|i| tagged(i, vec![1.0, 0.0])).collect();
        let ranked = rank(&[1.0, 0.0], &docs);
        let ids: Vec<String> = ranked.iter().map(|(d, _)| d.doc_id().to_string()).collect();
        let expected: Vec<String> = (0..count).map(|i| i.to_string()).collect();
        prop_assert_eq!(ids, expected);
    }
}
