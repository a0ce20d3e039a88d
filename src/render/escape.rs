//! HTML escaping for untrusted model text.

/// Replace the five HTML-sensitive characters with character references.
///
/// `&` is handled first so references produced for the other characters are
/// never escaped a second time within the same call. The function is not
/// idempotent: escaping already-escaped text turns `&lt;` into `&amp;lt;`,
/// so every text span must be escaped exactly once.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Character references emitted by [`escape_html`].
pub(crate) const ENTITY_REFS: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn leaves_other_characters_untouched() {
        let text = "plain text, unicode ✓ and symbols #$%*";
        assert_eq!(escape_html(text), text);
    }

    #[test]
    fn escaping_twice_differs_from_escaping_once() {
        let once = escape_html("a < b");
        let twice = escape_html(&once);
        assert_eq!(once, "a &lt; b");
        assert_eq!(twice, "a &amp;lt; b");
        assert_ne!(once, twice);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(escape_html(""), "");
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn output_never_contains_raw_markup(text in ".{0,64}") {
                let escaped = escape_html(&text);
                prop_assert!(!escaped.contains('<'));
                prop_assert!(!escaped.contains('>'));
                prop_assert!(!escaped.contains('"'));
                prop_assert!(!escaped.contains('\''));
            }

            #[test]
            fn text_without_special_characters_is_unchanged(
                text in proptest::string::string_regex("[a-zA-Z0-9 .,;:!?#*-]{0,48}").expect("regex")
            ) {
                prop_assert_eq!(escape_html(&text), text);
            }
        }
    }
}
