//! Heuristic re-indentation applied before highlighting.
//!
//! Neither pass parses the code. Braces inside string literals or colons in
//! dictionary literals can throw the depth off; the output is still the same
//! code with different leading whitespace.

use crate::textutil::{indent_width, is_blank};

const INDENT: &str = "    ";

/// Re-indent C-family code by brace depth.
///
/// A line starting with `}` closes a level before it is emitted; a line
/// ending with `{` opens one after. Blank lines pass through untouched.
pub fn reindent_braces(code: &str) -> String {
    let mut depth: usize = 0;
    let mut out = Vec::new();
    for line in code.split('\n') {
        if is_blank(line) {
            out.push(line.to_string());
            continue;
        }
        let trimmed = line.trim();
        if trimmed.starts_with('}') {
            depth = depth.saturating_sub(1);
        }
        out.push(format!("{}{trimmed}", INDENT.repeat(depth)));
        if trimmed.ends_with('{') {
            depth += 1;
        }
    }
    out.join("\n")
}

/// Re-indent Python-family code by colon depth.
///
/// A level opens on the line after one that ends with `:`. A level closes on
/// a dedent keyword (`except`, `elif`, `else`, `finally`) and, when the source
/// still carries indentation, whenever a line falls back out of its block.
pub fn reindent_colons(code: &str) -> String {
    let mut depth: usize = 0;
    // Source indent of each open block's body; `None` when the source is flat.
    let mut blocks: Vec<Option<usize>> = Vec::new();
    let mut previous: Option<(usize, bool)> = None;
    let mut out = Vec::new();

    for line in code.split('\n') {
        if is_blank(line) {
            out.push(line.to_string());
            continue;
        }
        let trimmed = line.trim();
        let indent = indent_width(line);

        if let Some((prev_indent, true)) = previous {
            depth += 1;
            blocks.push((indent > prev_indent).then_some(indent));
        }

        let mut dedented = false;
        while let Some(Some(body)) = blocks.last() {
            if indent >= *body {
                break;
            }
            blocks.pop();
            depth = depth.saturating_sub(1);
            dedented = true;
        }

        if !dedented && starts_with_dedent_keyword(trimmed) {
            blocks.pop();
            depth = depth.saturating_sub(1);
        }

        out.push(format!("{}{trimmed}", INDENT.repeat(depth)));
        previous = Some((indent, trimmed.ends_with(':')));
    }
    out.join("\n")
}

fn starts_with_dedent_keyword(line: &str) -> bool {
    ["except", "elif", "else", "finally"].iter().any(|keyword| {
        line.strip_prefix(keyword).is_some_and(|rest| {
            rest.chars()
                .next()
                .is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
        })
    })
}
