//! String helpers

use std::borrow::Cow;

/// Cut `s` to at most `max_chars` characters, marking the cut with `…`.
///
/// Counts `char`s, so the cut always lands on a UTF-8 boundary.
pub fn clip(s: &str, max_chars: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => Cow::Owned(format!("{}…", &s[..idx])),
        None => Cow::Borrowed(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_short_input_is_borrowed() {
        assert!(matches!(clip("quota exceeded", 50), Cow::Borrowed("quota exceeded")));
        assert_eq!(clip("", 3), "");
    }

    #[test]
    fn test_clip_marks_the_cut() {
        assert_eq!(clip("API error: 429", 9), "API error…");
    }

    #[test]
    fn test_clip_multibyte() {
        assert_eq!(clip("héllo wörld", 7), "héllo w…");
        assert_eq!(clip("日本語テキスト", 3), "日本語…");
    }
}
