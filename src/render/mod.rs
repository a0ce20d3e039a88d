//! Message rendering pipeline.
//!
//! [`render_message`] runs the stages in a fixed order:
//!
//! 1. LaTeX symbol substitution ([`latex`])
//! 2. response formatting ([`formatter`])
//! 3. fenced block extraction into placeholders ([`extract`])
//! 4. one HTML escape over the remaining prose ([`escape`])
//! 5. inline code, links, bold, italic, auto-links ([`inline`])
//! 6. section classification ([`structure`])
//! 7. placeholder restoration
//!
//! Every stage is total: malformed Markdown degrades into paragraph text.

pub mod escape;
pub mod extract;
pub mod formatter;
pub mod inline;
pub mod latex;
pub mod structure;

pub use escape::escape_html;
pub use formatter::format_response;

use extract::{PlaceholderStore, BLOCK_PREFIX, INLINE_PREFIX};

/// Render raw model output as an HTML fragment.
pub fn render_message(text: &str) -> String {
    let text = latex::substitute_symbols(text);
    let formatted = format_response(&text);

    let mut blocks = PlaceholderStore::for_source(BLOCK_PREFIX, &formatted);
    let mut inlines = PlaceholderStore::for_source(INLINE_PREFIX, &formatted);

    let extracted = extract::extract_fenced_blocks(&formatted, &mut blocks);
    let escaped = escape_html(&extracted);
    let inlined = inline::render_inline(&escaped, &mut inlines);
    let sections = structure::render_sections(&inlined, &blocks);

    tracing::debug!(
        blocks = blocks.len(),
        inline = inlines.len(),
        "rendered message"
    );
    blocks.restore(&inlines.restore(&sections))
}


#[cfg(feature = "fuzz-tests")]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn no_tokens_leak(body in "[a-z *#|>\\n-]{0,80}", code in "[a-z ;(){}\\n]{0,40}") {
            let text = format!("{body}\n```\n{code}\n```\n{body}");
            let html = render_message(&text);
            prop_assert!(!html.contains("__CODE_BLOCK_"));
            prop_assert!(!html.contains("__INLINE_"));
            prop_assert_eq!(html.matches("<div class=\"code-block\">").count(), 1);
        }

        #[test]
        fn plain_words_render_as_one_paragraph(words in proptest::collection::vec("[a-z]{1,8}", 1..12)) {
            let text = words.join(" ");
            prop_assert_eq!(render_message(&text), format!("<p>{text}</p>"));
        }
    }
}
