use unicode_segmentation::UnicodeSegmentation;

/// Truncate `text` to at most `max_graphemes`, appending "..." when anything
/// was cut and the budget allows it.
pub(crate) fn truncate_text(text: &str, max_graphemes: usize) -> String {
    let mut graphemes = text.grapheme_indices(true);
    match graphemes.nth(max_graphemes) {
        // More than max_graphemes present, so truncation is needed.
        Some((byte_index, _)) => {
            if max_graphemes >= 3 {
                let mut truncate_graphemes = text.grapheme_indices(true);
                match truncate_graphemes.nth(max_graphemes - 3) {
                    Some((truncate_byte_index, _)) => {
                        let truncated = &text[..truncate_byte_index];
                        format!("{truncated}...")
                    }
                    None => text.to_string(),
                }
            } else {
                text[..byte_index].to_string()
            }
        }
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exact", 5), "exact");
    }

    #[test]
    fn long_text_gets_an_ellipsis_within_budget() {
        assert_eq!(truncate_text("long chapter title", 10), "long ch...");
    }

    #[test]
    fn tiny_budgets_truncate_without_ellipsis() {
        assert_eq!(truncate_text("abcdef", 2), "ab");
    }
}
