//! src/util/escape.rs
//! ============================================================================
//! # Markup escaping for backend-supplied text
//!
//! Result titles and links come from the backend verbatim and end up inside
//! rendered card text (and, via activation, in the system handler). Escaping
//! keeps a hostile payload inert wherever the card text is copied or
//! re-embedded: markup arrives as literal text, never as markup.

/// Escape `&`, `<`, `>` and `"` for safe insertion into card text.
#[must_use]
pub fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(escape_markup("hello world"), "hello world");
    }

    #[test]
    fn test_markup_characters_become_entities() {
        assert_eq!(escape_markup("<b>&\""), "&lt;b&gt;&amp;&quot;");
    }

    #[test]
    fn test_already_escaped_text_is_escaped_again() {
        assert_eq!(escape_markup("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(escape_markup(""), "");
    }
}
