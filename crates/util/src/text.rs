//! Display-width aware text helpers for table cells and status lines.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Collapse line breaks and tabs so a value fits on one terminal row.
pub fn single_line(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' | '\r' | '\t' => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Truncate `text` to at most `max_width` terminal columns, ending with `…`
/// when anything was cut.
///
/// ```rust
/// use jitpages_util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("repository", 5), "repo…");
/// assert_eq!(truncate_to_width("repo", 5), "repo");
/// ```
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0usize;
    let mut out = String::new();
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

/// Display width of `text` in terminal columns.
pub fn display_width(text: &str) -> usize {
    text.width()
}
