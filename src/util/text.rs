pub const ABBREVIATION_MARKER: &str = "...";

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// First `max_chars` characters of `s`, cut on a char boundary.
pub fn left(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Shorten `s` to at most `max_chars` characters, ending with a marker when cut.
pub fn abbreviate(s: &str, max_chars: usize) -> String {
    let marker_len = ABBREVIATION_MARKER.chars().count();
    if s.chars().count() <= max_chars { return s.to_string(); }
    if max_chars <= marker_len { return left(s, max_chars).to_string(); }
    let mut out = left(s, max_chars - marker_len).to_string();
    out.push_str(ABBREVIATION_MARKER);
    out
}

/// Split on `\r\n`, `\n` or a lone `\r`. Blank lines are kept so positions stay 1-based
/// line numbers; a trailing terminator does not open a new line.
pub fn split_lines(s: &str) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                out.push(&s[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                out.push(&s[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < s.len() { out.push(&s[start..]); }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_covers_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\r\n"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn left_counts_chars_not_bytes() {
        assert_eq!(left("héllo", 2), "hé");
        assert_eq!(left("abc", 10), "abc");
        assert_eq!(left("abc", 0), "");
    }

    #[test]
    fn abbreviate_adds_marker_within_width() {
        assert_eq!(abbreviate("abcdefghij", 7), "abcd...");
        assert_eq!(abbreviate("abcdefghij", 10), "abcdefghij");
        assert_eq!(abbreviate("short", 256), "short");
    }

    #[test]
    fn split_lines_handles_every_terminator() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\r\rb\n\n"), vec!["a", "", "b", ""]);
        assert_eq!(split_lines("x\n"), vec!["x"]);
        assert!(split_lines("").is_empty());
    }
}
