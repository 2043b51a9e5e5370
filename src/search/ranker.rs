//! Cosine-similarity ranking.

use crate::documents::TaggedDocument;

/// Cosine similarity of two vectors.
///
/// Returns `0.0` when the lengths differ, either vector has zero magnitude,
/// or the result is not finite.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let score = dot / (norm_a * norm_b);
    // Adding 0.0 turns -0.0 into 0.0 so equal scores compare equal in total_cmp.
    if score.is_finite() { score + 0.0 } else { 0.0 }
}

/// Rank `documents` by similarity to `query`, highest first.
///
/// Unembedded documents are dropped. Equal scores keep their input order.
#[must_use]
pub fn rank<'a, I>(query: &[f32], documents: I) -> Vec<(&'a TaggedDocument, f32)>
where
    I: IntoIterator<Item = &'a TaggedDocument>,
{
    let mut scored: Vec<(&TaggedDocument, f32)> = documents
        .into_iter()
        .filter_map(|doc| {
            doc.embedding
                .vector()
                .map(|vector| (doc, cosine_similarity(query, vector)))
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
}
