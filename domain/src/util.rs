//! Shared utility functions.

/// Single-line preview of `s` for log messages.
///
/// Whitespace runs (including newlines) collapse to one space and the result
/// is cut to at most `max_chars` characters, with `...` appended when cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut out: String = collapsed.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_is_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn preview_collapses_whitespace() {
        assert_eq!(preview("a\n\n  b\tc", 20), "a b c");
    }

    #[test]
    fn preview_truncates_on_chars() {
        assert_eq!(preview("hello world", 5), "hello...");
        assert_eq!(preview("あのね", 2), "あの...");
    }

    #[test]
    fn preview_empty() {
        assert_eq!(preview("", 10), "");
    }
}
