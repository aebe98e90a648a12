//! String helpers

use unicode_segmentation::UnicodeSegmentation;

/// Truncate text to at most `max_len` bytes on a grapheme boundary,
/// ending with "..." when anything was cut.
pub fn safe_truncate(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }

    let budget = max_len.saturating_sub(3);
    let mut truncated = String::new();

    for grapheme in text.graphemes(true) {
        if truncated.len() + grapheme.len() > budget {
            break;
        }
        truncated.push_str(grapheme);
    }

    if max_len >= 3 {
        truncated.push_str("...");
    }
    truncated
}

/// True when the text is empty or whitespace only
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
