use std::borrow::Cow;

/// Ellipsis appended when text is cut
const ELLIPSIS: &str = "...";

/// Truncates a string to at most `max_chars` characters, appending "..."
/// when anything was cut.
///
/// Counts `char`s, never bytes, so multi-byte titles are cut on a character
/// boundary. Strings that already fit are returned borrowed.
///
/// # Examples
///
/// ```
/// use feedwire::util::truncate_chars;
///
/// assert_eq!(truncate_chars("Short", 40), "Short");
/// assert_eq!(truncate_chars("Hello World", 5), "Hello...");
/// assert_eq!(truncate_chars("Ünïcödé", 3), "Ünï...");
/// ```
pub fn truncate_chars(s: &str, max_chars: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &s[..cut], ELLIPSIS)),
        None => Cow::Borrowed(s),
    }
}

/// Prepares feed-supplied text for a single log line.
///
/// Control characters (including newlines and ANSI escapes) are replaced
/// with spaces so a hostile title cannot forge extra log lines, then the
/// result is truncated to `max_chars`.
pub fn log_excerpt(s: &str, max_chars: usize) -> String {
    let cleaned: Cow<'_, str> = if s.chars().any(char::is_control) {
        Cow::Owned(
            s.chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    };

    truncate_chars(cleaned.trim(), max_chars).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_limit() {
        assert!(matches!(truncate_chars("abc", 40), Cow::Borrowed("abc")));
        assert_eq!(truncate_chars("", 40), "");
    }

    #[test]
    fn test_truncate_exactly_at_limit() {
        let s = "a".repeat(40);
        assert_eq!(truncate_chars(&s, 40), s.as_str());
    }

    #[test]
    fn test_truncate_over_limit() {
        let s = "b".repeat(41);
        let out = truncate_chars(&s, 40);
        assert_eq!(out, format!("{}...", "b".repeat(40)));
    }

    #[test]
    fn test_truncate_multibyte_boundary() {
        // Each char is 3 bytes; a byte slice at 40 would split a char
        let s = "日".repeat(50);
        let out = truncate_chars(&s, 40);
        assert_eq!(out.chars().count(), 43);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_zero() {
        assert_eq!(truncate_chars("abc", 0), "...");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn test_log_excerpt_strips_control_chars() {
        assert_eq!(log_excerpt("Line one\nLine two", 40), "Line one Line two");
        assert_eq!(log_excerpt("\x1b[31mRed\x1b[0m", 40), "[31mRed [0m");
    }

    #[test]
    fn test_log_excerpt_truncates() {
        let title = "Bitcoin rallies as markets digest the latest inflation print";
        let out = log_excerpt(title, 40);
        assert_eq!(out, "Bitcoin rallies as markets digest the la...");
    }
}
