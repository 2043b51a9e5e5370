//! Bounded previews of document content.

/// Default preview length used for query results.
pub const DEFAULT_SNIPPET_CHARS: usize = 200;

/// Appended when a preview is cut mid-sentence.
pub const ELLIPSIS: &str = "...";

const SENTENCE_ENDINGS: [&str; 3] = [". ", "? ", "! "];

/// Trim `content` to at most `max_chars` characters, preferring to end on a
/// sentence boundary in the second half of the preview.
///
/// Lengths are counted in `char`s. Content that already fits is returned
/// unchanged.
#[must_use]
pub fn extract(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }

    let head = match content.char_indices().nth(max_chars) {
        Some((byte_end, _)) => &content[..byte_end],
        None => content,
    };
    let half = max_chars / 2;

    for ending in SENTENCE_ENDINGS {
        if let Some(pos) = head.rfind(ending) {
            if head[..pos].chars().count() > half {
                // Keep the punctuation, drop the trailing space.
                return head[..=pos].trim().to_string();
            }
        }
    }

    let mut cut = head;
    if let Some((pos, _)) = head.char_indices().rev().find(|(_, c)| c.is_whitespace()) {
        if pos > 0 {
            cut = &head[..pos];
        }
    }
    format!("{}{ELLIPSIS}", cut.trim())
}
