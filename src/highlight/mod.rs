//! Per-language syntax highlighting into category spans.
//!
//! [`highlight_code`] is the single entry point: it resolves the language
//! (from a fence label or by detection), escapes the code, re-indents it for
//! brace or colon languages, and runs the language's ordered rule table.

use std::collections::HashMap;
use std::sync::OnceLock;

pub mod detect;
pub mod indent;
pub mod langs;
pub mod language;
pub mod rules;

pub use detect::detect_language;
pub use language::{IndentStyle, Language};
pub use rules::Category;

use crate::render::escape::escape_html;
use rules::{apply_rules, Rule};

static RULE_SETS: OnceLock<HashMap<Language, Vec<Rule>>> = OnceLock::new();

const ALL_LANGUAGES: [Language; 19] = [
    Language::JavaScript,
    Language::TypeScript,
    Language::Python,
    Language::Html,
    Language::Css,
    Language::Json,
    Language::Shell,
    Language::Sql,
    Language::C,
    Language::Java,
    Language::Go,
    Language::Rust,
    Language::Php,
    Language::Ruby,
    Language::Swift,
    Language::Kotlin,
    Language::CSharp,
    Language::Dart,
    Language::Generic,
];

fn rule_sets() -> &'static HashMap<Language, Vec<Rule>> {
    RULE_SETS.get_or_init(|| {
        ALL_LANGUAGES
            .iter()
            .map(|&language| {
                let compiled = langs::rule_table(language)
                    .iter()
                    .filter_map(|spec| match Rule::compile(spec) {
                        Ok(rule) => Some(rule),
                        Err(e) => {
                            tracing::warn!(%language, pattern = %spec.pattern, error = %e, "dropping highlight rule");
                            None
                        }
                    })
                    .collect();
                (language, compiled)
            })
            .collect()
    })
}

/// Resolve the language for `code`: normalize `label` when present,
/// otherwise detect from content.
pub fn resolve_language(code: &str, label: Option<&str>) -> Language {
    match label.map(str::trim).filter(|label| !label.is_empty()) {
        Some(label) => Language::from_label(label),
        None => detect_language(code),
    }
}

/// Highlight raw (unescaped) `code` and return HTML with category spans.
pub fn highlight_code(code: &str, label: Option<&str>) -> String {
    let language = resolve_language(code, label);
    tracing::debug!(%language, label = label.unwrap_or(""), "highlighting code");
    highlight_as(code, language)
}

/// Highlight raw `code` as a known `language`.
pub fn highlight_as(code: &str, language: Language) -> String {
    let escaped = escape_html(code);
    let shaped = match language.indent_style() {
        IndentStyle::Brace => indent::reindent_braces(&escaped),
        IndentStyle::Colon => indent::reindent_colons(&escaped),
        IndentStyle::Preserve => escaped,
    };
    let rules = rule_sets()
        .get(&language)
        .map(Vec::as_slice)
        .unwrap_or_default();
    apply_rules(&shaped, rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_and_highlights_unlabeled_javascript() {
        let html = highlight_code("function foo() { return 1; }", None);
        assert!(html.contains("<span class=\"keyword\">function</span>"), "{html}");
        assert!(html.contains("<span class=\"function\">foo</span>"), "{html}");
        assert!(html.contains("<span class=\"keyword\">return</span>"), "{html}");
        assert!(html.contains("<span class=\"number\">1</span>"), "{html}");
    }

    #[test]
    fn label_overrides_detection() {
        assert_eq!(resolve_language("def f(): pass", Some("rs")), Language::Rust);
        assert_eq!(resolve_language("def f(): pass", Some("  ")), Language::Python);
    }

    #[test]
    fn unknown_labels_use_generic_highlighting() {
        let html = highlight_code("if x then 42 \"s\"", Some("cobol"));
        assert!(!html.contains("keyword"), "{html}");
        assert!(html.contains("<span class=\"number\">42</span>"), "{html}");
        assert!(html.contains("<span class=\"string\">&quot;s&quot;</span>"), "{html}");
    }

    #[test]
    fn source_markup_is_escaped_before_wrapping() {
        let html = highlight_code("<script>alert('x')</script>", Some("text"));
        assert!(!html.contains("<script>"), "{html}");
        assert!(html.contains("&lt;script&gt;"), "{html}");
    }

    #[test]
    fn keywords_inside_strings_and_comments_stay_unwrapped() {
        let html = highlight_code("let s = \"return\"; // if else", Some("js"));
        assert!(html.contains("<span class=\"string\">&quot;return&quot;</span>"), "{html}");
        assert!(html.contains("<span class=\"comment\">// if else</span>"), "{html}");
        assert_eq!(html.matches("class=\"keyword\"").count(), 1, "{html}");
    }

    #[test]
    fn urls_inside_strings_are_not_comments() {
        let html = highlight_code("fetch(\"http://example.com\");", Some("javascript"));
        assert!(!html.contains("comment"), "{html}");
    }

    #[test]
    fn typescript_output_is_not_duplicated() {
        let code = "const n: number = 1;";
        let html = highlight_code(code, Some("ts"));
        assert_eq!(html.matches("const").count(), 1, "{html}");
        assert!(html.contains("<span class=\"type\">number</span>"), "{html}");
        assert!(html.contains("<span class=\"keyword\">const</span>"), "{html}");
    }

    #[test]
    fn python_is_reindented_by_colons() {
        let html = highlight_code("def f():\nreturn 1", Some("python"));
        assert!(html.contains("\n    <span class=\"keyword\">return</span>"), "{html}");
    }

    #[test]
    fn brace_languages_are_reindented() {
        let html = highlight_code("fn main() {\nlet x = 1;\n}", Some("rust"));
        assert!(html.contains("\n    <span class=\"keyword\">let</span>"), "{html}");
    }

    #[test]
    fn json_categories() {
        let html = highlight_code(r#"{"ok": true, "n": 2, "s": "v"}"#, Some("json"));
        assert!(html.contains("<span class=\"json-key\">&quot;ok&quot;</span>"), "{html}");
        assert!(html.contains("<span class=\"json-boolean\">true</span>"), "{html}");
        assert!(html.contains("<span class=\"json-number\">2</span>"), "{html}");
        assert!(html.contains("<span class=\"json-string\">&quot;v&quot;</span>"), "{html}");
    }

    #[test]
    fn json_whitespace_is_preserved() {
        let code = "{\n  \"a\": 1\n}";
        let html = highlight_code(code, Some("json"));
        assert!(html.starts_with("{\n  <span class=\"json-key\">"), "{html}");
    }

    #[test]
    fn html_categories() {
        let html = highlight_code("<a href=\"/x\">hi</a>", Some("html"));
        assert!(html.contains("<span class=\"tag\">&lt;a</span>"), "{html}");
        assert!(html.contains("<span class=\"attribute\">href</span>"), "{html}");
        assert!(html.contains("<span class=\"string\">&quot;/x&quot;</span>"), "{html}");
        assert!(html.contains("<span class=\"tag\">&lt;/a</span>"), "{html}");
    }

    #[test]
    fn css_categories() {
        let html = highlight_code(".a { color: red; }", Some("css"));
        assert!(html.contains("<span class=\"property\">color</span>"), "{html}");
        assert!(html.contains("<span class=\"value\">red</span>"), "{html}");
    }

    #[test]
    fn shell_categories() {
        let html = highlight_code("git commit --amend $HOME", Some("bash"));
        assert!(html.contains("<span class=\"shell-command\">git</span>"), "{html}");
        assert!(html.contains("<span class=\"shell-flag\">--amend</span>"), "{html}");
        assert!(html.contains("<span class=\"variable\">$HOME</span>"), "{html}");
    }

    #[test]
    fn sql_categories() {
        let html = highlight_code("SELECT COUNT(*) FROM t WHERE name = 'x'", Some("sql"));
        assert!(html.contains("<span class=\"sql-keyword\">SELECT</span>"), "{html}");
        assert!(html.contains("<span class=\"sql-function\">COUNT</span>"), "{html}");
        assert!(html.contains("<span class=\"sql-string\">&#39;x&#39;</span>"), "{html}");
    }

    #[test]
    fn apostrophes_in_generic_text_survive_intact() {
        let html = highlight_code("it's 2", Some("text"));
        assert!(html.contains("it&#39;s"), "{html}");
        assert!(html.contains("<span class=\"number\">2</span>"), "{html}");
    }

    #[test]
    fn every_language_has_rules() {
        for language in ALL_LANGUAGES {
            assert!(
                rule_sets().get(&language).is_some_and(|rules| !rules.is_empty()),
                "{language}"
            );
        }
    }
}
