//! Ordered, category-tagged substitution rules.
//!
//! Every language highlighter is the same routine driven by a different rule
//! table. Rules run in table order over already-escaped code. Text wrapped by
//! an earlier rule is claimed: later rules never look inside it, which is what
//! keeps keywords out of comments and numbers out of strings. A match that
//! would split a character reference such as `&#39;` is skipped.

use regex::Regex;

use crate::render::escape::ENTITY_REFS;

/// Lexical category wrapped around a match. The class name is what the
/// stylesheet keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Keyword,
    Type,
    String,
    Number,
    Comment,
    Function,
    Attribute,
    Tag,
    Property,
    Value,
    Variable,
    JsonKey,
    JsonString,
    JsonNumber,
    JsonBoolean,
    SqlKeyword,
    SqlString,
    SqlFunction,
    ShellCommand,
    ShellFlag,
}

impl Category {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Type => "type",
            Self::String => "string",
            Self::Number => "number",
            Self::Comment => "comment",
            Self::Function => "function",
            Self::Attribute => "attribute",
            Self::Tag => "tag",
            Self::Property => "property",
            Self::Value => "value",
            Self::Variable => "variable",
            Self::JsonKey => "json-key",
            Self::JsonString => "json-string",
            Self::JsonNumber => "json-number",
            Self::JsonBoolean => "json-boolean",
            Self::SqlKeyword => "sql-keyword",
            Self::SqlString => "sql-string",
            Self::SqlFunction => "sql-function",
            Self::ShellCommand => "shell-command",
            Self::ShellFlag => "shell-flag",
        }
    }
}

/// Uncompiled rule: a regex source plus the category it produces.
///
/// When the pattern defines a capture group named `hl`, only that group is
/// wrapped; the rest of the match stays plain text.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    pub pattern: String,
    pub category: Category,
}

impl RuleSpec {
    pub fn new(pattern: impl Into<String>, category: Category) -> Self {
        Self {
            pattern: pattern.into(),
            category,
        }
    }

    /// Whole-word alternation over `words`.
    pub fn words(words: &[&str], category: Category) -> Self {
        Self::new(format!(r"\b(?:{})\b", words.join("|")), category)
    }

    /// Case-insensitive whole-word alternation over `words`.
    pub fn words_ci(words: &[&str], category: Category) -> Self {
        Self::new(format!(r"(?i)\b(?:{})\b", words.join("|")), category)
    }
}

/// A compiled rule.
#[derive(Debug, Clone)]
pub struct Rule {
    regex: Regex,
    category: Category,
}

impl Rule {
    pub fn compile(spec: &RuleSpec) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(&spec.pattern)?,
            category: spec.category,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

#[derive(Debug)]
enum Segment<'a> {
    Plain(&'a str),
    Claimed(Category, &'a str),
}

/// Apply `rules` in order to escaped `code` and return HTML with category spans.
pub fn apply_rules(code: &str, rules: &[Rule]) -> String {
    let mut segments = vec![Segment::Plain(code)];
    for rule in rules {
        segments = segments
            .into_iter()
            .flat_map(|segment| match segment {
                Segment::Plain(text) => split_on_rule(text, rule),
                claimed => vec![claimed],
            })
            .collect();
    }

    let mut out = String::with_capacity(code.len() * 2);
    for segment in segments {
        match segment {
            Segment::Plain(text) => out.push_str(text),
            Segment::Claimed(category, text) => {
                out.push_str("<span class=\"");
                out.push_str(category.class_name());
                out.push_str("\">");
                out.push_str(text);
                out.push_str("</span>");
            }
        }
    }
    out
}

fn split_on_rule<'a>(text: &'a str, rule: &Rule) -> Vec<Segment<'a>> {
    let mut out = Vec::new();
    let mut last = 0;
    for caps in rule.regex.captures_iter(text) {
        let Some(target) = caps.name("hl").or_else(|| caps.get(0)) else {
            continue;
        };
        if target.start() == target.end() || target.start() < last {
            continue;
        }
        if splits_entity(text, target.start(), target.end()) {
            continue;
        }
        if target.start() > last {
            out.push(Segment::Plain(&text[last..target.start()]));
        }
        out.push(Segment::Claimed(rule.category, target.as_str()));
        last = target.end();
    }
    if last < text.len() {
        out.push(Segment::Plain(&text[last..]));
    }
    out
}

/// True when `start..end` begins or ends strictly inside a character reference.
fn splits_entity(text: &str, start: usize, end: usize) -> bool {
    text.match_indices('&').any(|(at, _)| {
        ENTITY_REFS
            .iter()
            .find(|entity| text[at..].starts_with(*entity))
            .is_some_and(|entity| {
                let stop = at + entity.len();
                (start > at && start < stop) || (end > at && end < stop)
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(specs: &[RuleSpec]) -> Vec<Rule> {
        specs
            .iter()
            .map(|spec| Rule::compile(spec).expect("pattern"))
            .collect()
    }

    #[test]
    fn wraps_matches_in_category_spans() {
        let rules = compile(&[RuleSpec::words(&["let"], Category::Keyword)]);
        assert_eq!(
            apply_rules("let x", &rules),
            "<span class=\"keyword\">let</span> x"
        );
    }

    #[test]
    fn earlier_rules_claim_text_from_later_rules() {
        let rules = compile(&[
            RuleSpec::new(r"//.*", Category::Comment),
            RuleSpec::words(&["return"], Category::Keyword),
        ]);
        assert_eq!(
            apply_rules("x // return", &rules),
            "x <span class=\"comment\">// return</span>"
        );
    }

    #[test]
    fn named_group_limits_the_wrapped_text() {
        let rules = compile(&[RuleSpec::new(
            r"\b(?P<hl>[a-z]+)\s*\(",
            Category::Function,
        )]);
        assert_eq!(
            apply_rules("foo(1)", &rules),
            "<span class=\"function\">foo</span>(1)"
        );
    }

    #[test]
    fn never_splits_character_references() {
        let rules = compile(&[RuleSpec::new(r"\b\d+\b", Category::Number)]);
        assert_eq!(
            apply_rules("it&#39;s 7", &rules),
            "it&#39;s <span class=\"number\">7</span>"
        );
    }

    #[test]
    fn whole_references_may_be_wrapped() {
        let rules = compile(&[RuleSpec::new(r"&quot;.*?&quot;", Category::String)]);
        assert_eq!(
            apply_rules("x = &quot;a&quot;;", &rules),
            "x = <span class=\"string\">&quot;a&quot;</span>;"
        );
    }

    #[test]
    fn class_names_use_kebab_case_for_compound_categories() {
        assert_eq!(Category::JsonKey.class_name(), "json-key");
        assert_eq!(Category::ShellFlag.class_name(), "shell-flag");
        assert_eq!(Category::SqlFunction.class_name(), "sql-function");
    }
}
