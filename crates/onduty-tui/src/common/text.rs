//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Character used to mask hidden passwords.
pub const MASK_CHAR: char = '•';

/// Truncates a string with ellipsis if it exceeds `max_width` (unicode-aware).
///
/// Keeps the beginning of the text.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Truncates from the start so the end of the text stays visible.
///
/// Used for input fields, where the cursor sits at the end.
pub fn truncate_start_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut kept: Vec<char> = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        kept.push(ch);
    }
    let mut truncated = String::from("…");
    truncated.extend(kept.into_iter().rev());
    truncated
}

/// Replaces every character with `MASK_CHAR`.
pub fn mask(text: &str) -> String {
    std::iter::repeat_n(MASK_CHAR, text.chars().count()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_with_ellipsis_keeps_short_text() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_with_ellipsis("hello world", 6), "hello…");
    }

    #[test]
    fn test_truncate_start_keeps_tail() {
        assert_eq!(
            truncate_start_with_ellipsis("employee@domain.com", 8),
            "…ain.com"
        );
        assert_eq!(truncate_start_with_ellipsis("a@b.c", 8), "a@b.c");
    }

    #[test]
    fn test_truncate_start_wide_chars() {
        // "中文" is 4 columns wide
        assert_eq!(truncate_start_with_ellipsis("ab中文", 5), "…中文");
    }

    #[test]
    fn test_mask_counts_chars_not_bytes() {
        assert_eq!(mask("pässword"), "••••••••");
        assert_eq!(mask(""), "");
    }
}
