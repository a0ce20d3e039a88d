//! Fenced code block extraction and placeholder bookkeeping.
//!
//! Rendered code blocks are pulled out of the text before any prose pass
//! runs and replaced by `__CODE_BLOCK_<n>__` tokens. The structural renderer
//! never sees highlighted HTML; restoration swaps the tokens back last.

use regex::Captures;

use crate::highlight::{highlight_as, Language};
use crate::render::escape::escape_html;
use crate::textutil::trim_blank_lines;

/// Default token prefix for extracted fenced blocks.
pub const BLOCK_PREFIX: &str = "__CODE_BLOCK_";
/// Default token prefix for inline fragments (code spans, links).
pub const INLINE_PREFIX: &str = "__INLINE_";

/// Ordered store of rendered fragments addressed by placeholder tokens.
///
/// Token `n` is `<prefix><n>__`. The prefix is chosen so that it does not
/// occur in the source text, so a token in the output always refers to a
/// stored fragment.
#[derive(Debug, Clone)]
pub struct PlaceholderStore {
    prefix: String,
    items: Vec<String>,
}

impl PlaceholderStore {
    /// Create a store whose prefix starts from `base` and is extended until
    /// it no longer appears in `source`.
    pub fn for_source(base: &str, source: &str) -> Self {
        let mut prefix = base.to_string();
        while source.contains(&prefix) {
            prefix.push_str("X_");
        }
        Self {
            prefix,
            items: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Store `html` and return the token that stands in for it.
    pub fn insert(&mut self, html: String) -> String {
        let token = format!("{}{}__", self.prefix, self.items.len());
        self.items.push(html);
        token
    }

    /// True when `text`, trimmed, is exactly one token of this store.
    pub fn is_token(&self, text: &str) -> bool {
        let Some(rest) = text.trim().strip_prefix(&self.prefix) else {
            return false;
        };
        let Some(digits) = rest.strip_suffix("__") else {
            return false;
        };
        digits
            .parse::<usize>()
            .is_ok_and(|index| index < self.items.len())
    }

    /// Substitute every token in `text` with its stored fragment.
    ///
    /// Fragments may themselves contain tokens (a link whose label holds a
    /// code span), so substitution repeats until nothing changes.
    pub fn restore(&self, text: &str) -> String {
        let mut current = self.restore_once(text);
        for _ in 0..self.items.len() {
            if !current.contains(&self.prefix) {
                break;
            }
            let next = self.restore_once(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn restore_once(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(at) = rest.find(&self.prefix) {
            out.push_str(&rest[..at]);
            let after = &rest[at + self.prefix.len()..];
            let digits = after.bytes().take_while(u8::is_ascii_digit).count();
            let stored = after[..digits]
                .parse::<usize>()
                .ok()
                .filter(|_| after[digits..].starts_with("__"))
                .and_then(|index| self.items.get(index));
            match stored {
                Some(html) => {
                    out.push_str(html);
                    rest = &after[digits + 2..];
                }
                None => {
                    out.push_str(&self.prefix);
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Replace every fenced block in formatted `text` with a placeholder token.
///
/// Tagged fences are taken first, then untagged ones, whose language comes
/// from [`sniff_untagged`].
pub fn extract_fenced_blocks(text: &str, store: &mut PlaceholderStore) -> String {
    let tagged = cached_regex!(r"(?ms)^```[ \t]*([\w+#.-]+)[ \t]*\n(.*?)^```[ \t]*$");
    let untagged = cached_regex!(r"(?ms)^```[ \t]*\n(.*?)^```[ \t]*$");

    let after_tagged = tagged.replace_all(text, |caps: &Captures<'_>| {
        let label = caps.get(1).map_or("", |m| m.as_str()).to_ascii_lowercase();
        let body = caps.get(2).map_or("", |m| m.as_str());
        store.insert(render_code_block(body, &label, Language::from_label(&label)))
    });

    let before = store.len();
    let extracted = untagged
        .replace_all(&after_tagged, |caps: &Captures<'_>| {
            let body = caps.get(1).map_or("", |m| m.as_str());
            let language = sniff_untagged(body);
            let label = match language {
                Language::Generic => "text",
                known => known.tag(),
            };
            store.insert(render_code_block(body, label, language))
        })
        .into_owned();
    tracing::debug!(
        blocks = store.len(),
        untagged = store.len() - before,
        "extracted fenced blocks"
    );
    extracted
}

/// Guess the language of an untagged fence from a few telltale fragments.
pub fn sniff_untagged(code: &str) -> Language {
    if code.contains("public class") || code.contains("System.out") {
        Language::Java
    } else if code.contains("function") || code.contains("const ") || code.contains("let ") {
        Language::JavaScript
    } else if code.contains("def ") || code.contains("import ") || code.contains("print(") {
        Language::Python
    } else {
        Language::Generic
    }
}

/// Wrap highlighted code in the code-block skeleton.
pub fn render_code_block(body: &str, label: &str, language: Language) -> String {
    let code = trim_blank_lines(body);
    let highlighted = highlight_as(&code, language);
    let label = escape_html(if label.is_empty() { language.tag() } else { label });
    format!(
        "<div class=\"code-block\"><div class=\"code-header\">\
         <span class=\"code-language\">{label}</span>\
         <button class=\"copy-button\" type=\"button\">Copy</button></div>\
         <pre><code class=\"language-{label}\">{highlighted}</code></pre></div>"
    )
}
