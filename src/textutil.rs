//! Shared line-level text helpers.
//!
//! The formatter, extractor and re-indenters all reason about lines rather
//! than characters. These helpers keep the whitespace rules in one place so
//! every stage agrees on what "blank" and "indent" mean.

/// Width of a tab when measuring leading indentation.
const TAB_WIDTH: usize = 4;

/// True when the line holds nothing but whitespace.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Collapse every run of whitespace to a single space and trim both ends.
pub fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Measure leading indentation in columns, counting tabs as four columns.
pub fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

/// Drop blank lines from the start and end of `text`, keeping inner lines
/// (and the indentation of the first kept line) intact.
pub fn trim_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let Some(first) = lines.iter().position(|line| !is_blank(line)) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|line| !is_blank(line))
        .unwrap_or(first);
    lines[first..=last]
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_whitespace_squeezes_runs_and_trims() {
        assert_eq!(collapse_whitespace("  a \t b   c  "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn indent_width_counts_tabs_as_four() {
        assert_eq!(indent_width("\tx"), 4);
        assert_eq!(indent_width("  \tx"), 6);
        assert_eq!(indent_width("x"), 0);
    }

    #[test]
    fn trim_blank_lines_keeps_first_line_indent() {
        let text = "\n  \n    indented\n  next\n\n";
        assert_eq!(trim_blank_lines(text), "    indented\n  next");
    }

    #[test]
    fn trim_blank_lines_of_blank_text_is_empty() {
        assert_eq!(trim_blank_lines("\n \n\t\n"), "");
    }
}
