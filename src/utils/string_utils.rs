//! UTF-8-safe string truncation utilities
//!
//! Display helpers for cells and captured process output. Everything here
//! works on characters rather than bytes so multi-byte text never panics.

use super::constants::MAX_CELL_DISPLAY_CHARS;

/// Safely truncate a string to a maximum number of CHARACTERS (not bytes).
///
/// # Examples
/// ```
/// # use kodegen_tools_seospider::utils::string_utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
/// assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Shorten a table cell for display
///
/// Values longer than `MAX_CELL_DISPLAY_CHARS` become the first
/// `MAX_CELL_DISPLAY_CHARS - 3` characters followed by `...`.
/// The stored value is never touched; callers pass a borrowed cell.
#[must_use]
pub fn truncate_cell(value: &str) -> String {
    if value.chars().count() > MAX_CELL_DISPLAY_CHARS {
        format!(
            "{}...",
            safe_truncate_chars(value, MAX_CELL_DISPLAY_CHARS - 3)
        )
    } else {
        value.to_string()
    }
}

/// Last `lines` non-trailing lines of captured output, newline-joined
#[must_use]
pub fn output_tail(output: &str, lines: usize) -> String {
    let all: Vec<&str> = output.trim().lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_cells_are_untouched() {
        assert_eq!(truncate_cell("https://example.com/"), "https://example.com/");
        let exact = "a".repeat(MAX_CELL_DISPLAY_CHARS);
        assert_eq!(truncate_cell(&exact), exact);
    }

    #[test]
    fn long_cells_are_shortened_on_char_boundaries() {
        let long = "é".repeat(100);
        let shown = truncate_cell(&long);
        assert_eq!(shown.chars().count(), MAX_CELL_DISPLAY_CHARS);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn tail_keeps_last_lines() {
        let out = "one\ntwo\nthree\nfour\n\n";
        assert_eq!(output_tail(out, 2), "three\nfour");
        assert_eq!(output_tail(out, 10), "one\ntwo\nthree\nfour");
        assert_eq!(output_tail("", 3), "");
    }
}
