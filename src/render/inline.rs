//! Inline passes over escaped prose: code spans, links, emphasis, auto-links.
//!
//! Code spans and links become placeholders so that emphasis and the
//! structural renderer cannot rewrite their contents.

use regex::Captures;

use crate::render::escape::ENTITY_REFS;
use crate::render::extract::PlaceholderStore;

/// Run every inline pass in order.
pub fn render_inline(text: &str, store: &mut PlaceholderStore) -> String {
    let text = replace_code_spans(text, store);
    let text = replace_markdown_links(&text, store);
    let text = apply_emphasis(&text);
    autolink(&text, store)
}

/// Replace `` `code` `` with a `<code>` placeholder. The text is already
/// escaped, so the span content is stored as-is and never highlighted.
pub fn replace_code_spans(text: &str, store: &mut PlaceholderStore) -> String {
    cached_regex!(r"`([^`\n]+)`")
        .replace_all(text, |caps: &Captures<'_>| {
            let code = caps.get(1).map_or("", |m| m.as_str());
            store.insert(format!("<code>{code}</code>"))
        })
        .into_owned()
}

/// Replace `[label](http…)` with an anchor placeholder.
pub fn replace_markdown_links(text: &str, store: &mut PlaceholderStore) -> String {
    cached_regex!(r"\[([^\]\n]+)\]\((https?://[^\s)]+)\)")
        .replace_all(text, |caps: &Captures<'_>| {
            let label = caps.get(1).map_or("", |m| m.as_str());
            let href = caps.get(2).map_or("", |m| m.as_str());
            store.insert(anchor(href, &apply_emphasis(label)))
        })
        .into_owned()
}

/// `**bold**` to `<strong>`, then `*italic*` to `<em>`.
pub fn apply_emphasis(text: &str) -> String {
    let bold = cached_regex!(r"\*\*(.+?)\*\*").replace_all(text, "<strong>$1</strong>");
    cached_regex!(r"\*([^*\s](?:[^*\n]*[^*\s])?)\*")
        .replace_all(&bold, "<em>$1</em>")
        .into_owned()
}

/// Turn bare `http(s)://` and `www.` URLs into anchor placeholders.
pub fn autolink(text: &str, store: &mut PlaceholderStore) -> String {
    cached_regex!(r"\b(?:https?://|www\.)[^\s<]+")
        .replace_all(text, |caps: &Captures<'_>| {
            let matched = caps.get(0).map_or("", |m| m.as_str());
            let url_len = url_extent(matched, store.prefix());
            let (url, rest) = matched.split_at(url_len);
            if url.is_empty() || url == "www." {
                return matched.to_string();
            }
            let href = if url.starts_with("www.") {
                format!("https://{url}")
            } else {
                url.to_string()
            };
            format!("{}{rest}", store.insert(anchor(&href, url)))
        })
        .into_owned()
}

/// Length of the URL at the start of `candidate`: stop at an escaped quote
/// or angle bracket or at a placeholder token, then drop trailing sentence
/// punctuation.
fn url_extent(candidate: &str, token_prefix: &str) -> usize {
    let mut end = ENTITY_REFS
        .iter()
        .filter(|entity| **entity != "&amp;")
        .filter_map(|entity| candidate.find(entity))
        .chain(candidate.find(token_prefix))
        .min()
        .unwrap_or(candidate.len());
    loop {
        let url = &candidate[..end];
        let Some(last) = url.chars().last() else {
            break;
        };
        // A trailing `&amp;` is one character, not a `;`.
        if url.ends_with("&amp;") {
            break;
        }
        let unbalanced_paren =
            last == ')' && url.matches(')').count() > url.matches('(').count();
        if matches!(last, '.' | ',' | ';' | ':' | '!' | '?') || unbalanced_paren {
            end -= last.len_utf8();
        } else {
            break;
        }
    }
    end
}

fn anchor(href: &str, label: &str) -> String {
    format!("<a href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\">{label}</a>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::extract::INLINE_PREFIX;

    fn run(text: &str) -> String {
        let mut store = PlaceholderStore::for_source(INLINE_PREFIX, text);
        let out = render_inline(text, &mut store);
        store.restore(&out)
    }

    #[test]
    fn code_spans_are_not_emphasized() {
        assert_eq!(run("use `a*b*c` here"), "use <code>a*b*c</code> here");
    }

    #[test]
    fn bold_and_italic() {
        assert_eq!(run("**bold** and *it*"), "<strong>bold</strong> and <em>it</em>");
    }

    #[test]
    fn spaced_asterisks_are_not_italic() {
        assert_eq!(run("2 * 3 * 4"), "2 * 3 * 4");
    }

    #[test]
    fn markdown_links_become_anchors() {
        assert_eq!(
            run("see [the **docs**](https://x.dev/a_b*c*)"),
            "see <a href=\"https://x.dev/a_b*c*\" target=\"_blank\" rel=\"noopener noreferrer\">the <strong>docs</strong></a>"
        );
    }

    #[test]
    fn bare_urls_are_linked_without_trailing_punctuation() {
        assert_eq!(
            run("Visit https://example.com/path."),
            "Visit <a href=\"https://example.com/path\" target=\"_blank\" rel=\"noopener noreferrer\">https://example.com/path</a>."
        );
    }

    #[test]
    fn www_urls_get_a_scheme() {
        assert_eq!(
            run("(www.example.com)"),
            "(<a href=\"https://www.example.com\" target=\"_blank\" rel=\"noopener noreferrer\">www.example.com</a>)"
        );
    }

    #[test]
    fn urls_stop_at_escaped_quotes() {
        let html = run("&quot;https://a.io/x&quot;");
        assert!(html.starts_with("&quot;<a href=\"https://a.io/x\""), "{html}");
        assert!(html.ends_with("</a>&quot;"), "{html}");
    }

    #[test]
    fn escaped_ampersands_stay_in_query_strings() {
        let html = run("https://a.io/?x=1&amp;y=2");
        assert!(html.contains("href=\"https://a.io/?x=1&amp;y=2\""), "{html}");
    }

    #[test]
    fn urls_end_before_a_following_code_span() {
        let html = run("see www.example.com`code` now");
        assert_eq!(
            html,
            "see <a href=\"https://www.example.com\" target=\"_blank\" rel=\"noopener noreferrer\">www.example.com</a><code>code</code> now"
        );
    }

    #[test]
    fn urls_end_before_a_following_markdown_link() {
        let html = run("https://a.com[x](https://b.com/onmouseover=alert//)");
        assert_eq!(
            html,
            "<a href=\"https://a.com\" target=\"_blank\" rel=\"noopener noreferrer\">https://a.com</a>\
             <a href=\"https://b.com/onmouseover=alert//\" target=\"_blank\" rel=\"noopener noreferrer\">x</a>"
        );
    }

    #[test]
    fn trailing_escaped_ampersand_is_kept_whole() {
        let html = run("https://a.io/?x=1&amp;");
        assert!(html.contains("href=\"https://a.io/?x=1&amp;\""), "{html}");
        assert!(!html.contains("&amp</a>"), "{html}");
    }
}
