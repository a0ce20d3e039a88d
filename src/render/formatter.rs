//! Pre-extraction cleanup of raw model text.
//!
//! The formatter normalizes line endings, puts blank lines around headings,
//! list starts and code fences, canonicalizes bullets, decorates recognized
//! section headings with an emoji, drops horizontal rules and squeezes
//! whitespace. Only prose is touched: lines inside a fenced block are copied
//! verbatim so code indentation survives the whitespace pass.

use std::sync::OnceLock;

use regex::Regex;

use crate::textutil::collapse_whitespace;

/// Heading keyword patterns and the emoji prepended to matching headings.
/// First match wins.
const HEADING_EMOJI: &[(&str, &str)] = &[
    (r"(?i)\b(?:tips?|hints?|pro tip|best practices?)\b", "💡"),
    (r"(?i)\b(?:examples?|samples?|usage)\b", "📝"),
    (r"(?i)\b(?:summary|overview|conclusion|tl;?dr|recap)\b", "📋"),
    (r"(?i)\b(?:errors?|issues?|troubleshooting|problems?|bugs?)\b", "⚠️"),
    (r"(?i)\b(?:success(?:ful)?|done|completed?|solutions?|results?)\b", "✅"),
    (r"(?i)\b(?:steps?|process|workflow|procedure|instructions|how to)\b", "🔄"),
    (r"(?i)\b(?:code|implementation|snippets?|scripts?)\b", "💻"),
    (r"(?i)\b(?:notes?|remember|key points?)\b", "📌"),
    (r"(?i)\b(?:questions?|faq|q&a)\b", "❓"),
    (r"(?i)\b(?:references?|resources?|links?|sources?|further reading)\b", "🔗"),
    (r"(?i)\b(?:quotes?|quotations?|highlights?)\b", "✨"),
    (r"(?i)\b(?:warnings?|caution|danger|important)\b", "🚨"),
    (r"(?i)\b(?:info|information|details|about|background)\b", "ℹ️"),
    (r"(?i)\b(?:updates?|new|changelog|what's new|release notes)\b", "🆕"),
];

static HEADING_RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

fn heading_rules() -> &'static [(Regex, &'static str)] {
    HEADING_RULES.get_or_init(|| {
        HEADING_EMOJI
            .iter()
            .filter_map(|(pattern, emoji)| Regex::new(pattern).ok().map(|re| (re, *emoji)))
            .collect()
    })
}

/// Apply the full formatting pass. Must run exactly once, before extraction.
pub fn format_response(text: &str) -> String {
    let normalized = normalize_line_endings(text);
    let mut out = Output::default();
    let mut in_fence = false;
    let mut previous_was_list = false;

    for raw in normalized.split('\n') {
        if in_fence {
            if is_fence(raw) {
                out.push_code(raw.trim().to_string());
                out.blank_after = true;
                in_fence = false;
            } else {
                out.push_code(raw.to_string());
            }
            continue;
        }

        let line = collapse_whitespace(raw);
        if line.is_empty() {
            out.push_blank();
            previous_was_list = false;
            continue;
        }
        if is_fence(&line) {
            out.ensure_blank();
            out.push_code(line);
            in_fence = true;
            previous_was_list = false;
            continue;
        }
        if is_horizontal_rule(&line) {
            continue;
        }
        if is_heading(&line) {
            out.ensure_blank();
            out.push_prose(decorate_heading(&line));
            out.blank_after = true;
            previous_was_list = false;
            continue;
        }
        if let Some(item) = canonical_bullet(&line) {
            if !previous_was_list {
                out.ensure_blank();
            }
            out.push_prose(item);
            previous_was_list = true;
            continue;
        }
        if is_numbered_item(&line) {
            if !previous_was_list {
                out.ensure_blank();
            }
            out.push_prose(line);
            previous_was_list = true;
            continue;
        }
        out.push_prose(line);
    }

    out.finish()
}

/// Collects output lines while tracking prose blank-line runs.
#[derive(Default)]
struct Output {
    lines: Vec<String>,
    /// Consecutive blank prose lines at the end of `lines`.
    blank_run: usize,
    /// The next non-blank line must be separated by a blank line.
    blank_after: bool,
}

impl Output {
    fn push_blank(&mut self) {
        // Four or more newlines collapse to three: at most two blank lines.
        if self.blank_run < 2 {
            self.lines.push(String::new());
            self.blank_run += 1;
        }
        self.blank_after = false;
    }

    fn ensure_blank(&mut self) {
        if self.blank_run == 0 && !self.lines.is_empty() {
            self.push_blank();
        }
        self.blank_after = false;
    }

    fn push_prose(&mut self, line: String) {
        if self.blank_after {
            self.ensure_blank();
        }
        self.lines.push(line);
        self.blank_run = 0;
    }

    fn push_code(&mut self, line: String) {
        if self.blank_after {
            self.ensure_blank();
        }
        self.lines.push(line);
        self.blank_run = 0;
    }

    fn finish(mut self) -> String {
        while self.lines.last().is_some_and(|line| line.is_empty()) {
            self.lines.pop();
        }
        let start = self
            .lines
            .iter()
            .position(|line| !line.is_empty())
            .unwrap_or(self.lines.len());
        self.lines[start..].join("\n")
    }
}

/// Convert `\r\n` and lone `\r` to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

fn is_horizontal_rule(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| matches!(c, '-' | '=' | '_'))
}

fn is_heading(line: &str) -> bool {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    (1..=6).contains(&hashes) && line[hashes..].starts_with(' ')
}

fn is_numbered_item(line: &str) -> bool {
    cached_regex!(r"^\d+[.)]\s").is_match(line)
}

/// Rewrite `•`, `*` and `-` bullets to the canonical `- ` form.
fn canonical_bullet(line: &str) -> Option<String> {
    let caps = cached_regex!(r"^(?:[-*]\s+|•\s*)(.*)$").captures(line)?;
    let rest = caps.get(1).map_or("", |m| m.as_str());
    if rest.is_empty() {
        return None;
    }
    Some(format!("- {rest}"))
}

/// Prepend a category emoji to a heading whose text matches a known section.
fn decorate_heading(line: &str) -> String {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    let (marker, text) = line.split_at(hashes);
    let text = text.trim();
    if starts_with_known_emoji(text) {
        return line.to_string();
    }
    match heading_rules().iter().find(|(re, _)| re.is_match(text)) {
        Some((_, emoji)) => format!("{marker} {emoji} {text}"),
        None => line.to_string(),
    }
}

fn starts_with_known_emoji(text: &str) -> bool {
    HEADING_EMOJI.iter().any(|(_, emoji)| {
        emoji
            .chars()
            .next()
            .is_some_and(|first| text.starts_with(first))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_line_endings() {
        assert_eq!(format_response("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn headings_are_surrounded_by_blank_lines() {
        assert_eq!(
            format_response("intro\n## Plan\nbody"),
            "intro\n\n## Plan\n\nbody"
        );
    }

    #[test]
    fn list_start_gets_blank_line_but_items_stay_together() {
        assert_eq!(
            format_response("Shopping:\n- milk\n- eggs"),
            "Shopping:\n\n- milk\n- eggs"
        );
        assert_eq!(
            format_response("Steps:\n1. one\n2. two"),
            "Steps:\n\n1. one\n2. two"
        );
    }

    #[test]
    fn bullets_are_canonicalized() {
        assert_eq!(format_response("• a\n* b\n-   c"), "- a\n- b\n- c");
    }

    #[test]
    fn bold_text_is_not_a_bullet() {
        assert_eq!(format_response("**bold** start"), "**bold** start");
    }

    #[test]
    fn fences_are_surrounded_by_blank_lines() {
        assert_eq!(
            format_response("see:\n```js\nx()\n```\nafter"),
            "see:\n\n```js\nx()\n```\n\nafter"
        );
    }

    #[test]
    fn fenced_lines_keep_their_whitespace() {
        let text = "```python\ndef f():\n    return  1\n\n\n\n\n```";
        assert_eq!(format_response(text), text);
    }

    #[test]
    fn known_headings_get_an_emoji() {
        assert_eq!(format_response("## Tips"), "## 💡 Tips");
        assert_eq!(format_response("# Summary"), "# 📋 Summary");
        assert_eq!(format_response("### Common Errors"), "### ⚠️ Common Errors");
        assert_eq!(format_response("## Warnings"), "## 🚨 Warnings");
    }

    #[test]
    fn headings_with_an_emoji_are_left_alone() {
        assert_eq!(format_response("## 💡 Tips"), "## 💡 Tips");
        assert_eq!(format_response("## Random Title"), "## Random Title");
    }

    #[test]
    fn horizontal_rules_are_removed() {
        assert_eq!(format_response("a\n\n---\n\nb"), "a\n\n\nb");
        assert_eq!(format_response("a\n===\nb"), "a\nb");
        assert_eq!(format_response("a\n___"), "a");
    }

    #[test]
    fn long_blank_runs_collapse_and_ends_are_trimmed() {
        assert_eq!(format_response("\n\n\na\n\n\n\n\n\nb\n\n"), "a\n\n\nb");
    }

    #[test]
    fn intra_line_whitespace_is_squeezed() {
        assert_eq!(format_response("  a    b \t c  "), "a b c");
    }
}
