//! Section classification and structural HTML emission.
//!
//! Text is split into sections on blank lines. Each section becomes one
//! table, list, heading, blockquote or paragraph, decided by line-level
//! heuristics. Placeholder lines for extracted code blocks are emitted bare
//! so block markup never ends up inside a `<p>`.

use std::fmt;

use crate::render::extract::PlaceholderStore;

/// Shape chosen for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Table,
    List { ordered: bool },
    Heading(u8),
    Blockquote,
    Paragraph,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => f.write_str("table"),
            Self::List { ordered: true } => f.write_str("ordered list"),
            Self::List { ordered: false } => f.write_str("unordered list"),
            Self::Heading(level) => write!(f, "h{level}"),
            Self::Blockquote => f.write_str("blockquote"),
            Self::Paragraph => f.write_str("paragraph"),
        }
    }
}

/// Render placeholder-bearing `text` section by section.
///
/// Lines that are exactly one of `blocks`' tokens are passed through on
/// their own; every other run of lines is classified and wrapped.
pub fn render_sections(text: &str, blocks: &PlaceholderStore) -> String {
    let mut html = Vec::new();
    for section in split_sections(text) {
        let mut run: Vec<&str> = Vec::new();
        for line in section {
            if blocks.is_token(line) {
                flush_run(&mut run, &mut html);
                html.push(line.trim().to_string());
            } else {
                run.push(line);
            }
        }
        flush_run(&mut run, &mut html);
    }
    html.join("\n")
}

fn flush_run(run: &mut Vec<&str>, html: &mut Vec<String>) {
    if run.is_empty() {
        return;
    }
    let kind = classify(run);
    tracing::trace!(%kind, lines = run.len(), "classified section");
    html.push(render_section(run, kind));
    run.clear();
}

/// Split on blank lines into trimmed, non-empty sections.
pub fn split_sections(text: &str) -> Vec<Vec<&str>> {
    let mut sections = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

/// Decide the shape of a non-empty section. Tables win over lists, lists
/// over the single-line shapes.
pub fn classify(lines: &[&str]) -> SectionKind {
    let table_rows = lines.iter().filter(|line| line.split('|').count() > 2).count();
    if table_rows >= 2 {
        return SectionKind::Table;
    }
    if let Some(ordered) = list_kind(lines) {
        return SectionKind::List { ordered };
    }
    let first = lines.first().copied().unwrap_or_default();
    if let Some((level, _)) = heading(first) {
        return SectionKind::Heading(level);
    }
    if quote_body(first).is_some() {
        return SectionKind::Blockquote;
    }
    SectionKind::Paragraph
}

/// `Some(ordered)` when the section reads as a list.
///
/// A lone numbered sentence such as "1. Do the thing" stays a paragraph:
/// numbered lines count only when there are at least two of them and they
/// start at 1 or at least one sits at its own position.
fn list_kind(lines: &[&str]) -> Option<bool> {
    let bullets = lines.iter().filter(|line| bullet_item(line).is_some()).count();
    let numbers: Vec<u64> = lines
        .iter()
        .filter_map(|line| numbered_item(line).map(|(n, _)| n))
        .collect();
    let first_is_one = lines
        .first()
        .and_then(|line| numbered_item(line))
        .is_some_and(|(n, _)| n == 1);
    let some_in_place = numbers
        .iter()
        .enumerate()
        .any(|(i, &n)| n == i as u64 + 1);
    let numbered_list = numbers.len() >= 2 && (first_is_one || some_in_place);

    if numbered_list {
        Some(true)
    } else if bullets > 1 {
        Some(!numbers.is_empty())
    } else {
        None
    }
}

fn bullet_item(line: &str) -> Option<&str> {
    let caps = cached_regex!(r"^[-*•]\s+(.+)$").captures(line)?;
    caps.get(1).map(|m| m.as_str())
}

fn numbered_item(line: &str) -> Option<(u64, &str)> {
    let caps = cached_regex!(r"^(\d+)[.)]\s+(.+)$").captures(line)?;
    let number = caps.get(1)?.as_str().parse().ok()?;
    Some((number, caps.get(2)?.as_str()))
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let text = line[hashes..].strip_prefix(' ')?;
    // `####` and deeper render as h3.
    Some((hashes.min(3) as u8, text.trim()))
}

/// Text after a `> ` marker. Prose is escaped by now, so the marker is
/// usually `&gt;`.
fn quote_body(line: &str) -> Option<&str> {
    let rest = line
        .strip_prefix("&gt;")
        .or_else(|| line.strip_prefix('>'))?;
    (rest.is_empty() || rest.starts_with(' ')).then(|| rest.trim_start())
}

fn render_section(lines: &[&str], kind: SectionKind) -> String {
    match kind {
        SectionKind::Table => render_table(lines),
        SectionKind::List { ordered } => render_list(lines, ordered),
        SectionKind::Heading(level) => {
            let joined = lines.join(" ");
            let text = heading(&joined).map_or(joined.as_str(), |(_, text)| text);
            format!("<h{level}>{text}</h{level}>")
        }
        SectionKind::Blockquote => {
            let body: Vec<&str> = lines
                .iter()
                .map(|&line| quote_body(line).unwrap_or(line))
                .filter(|line| !line.is_empty())
                .collect();
            format!("<blockquote>{}</blockquote>", body.join(" "))
        }
        SectionKind::Paragraph => format!("<p>{}</p>", lines.join(" ")),
    }
}

fn table_cells(line: &str) -> Vec<&str> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(str::trim).collect()
}

fn is_separator_row(cells: &[&str]) -> bool {
    !cells.is_empty()
        && cells
            .iter()
            .all(|cell| cached_regex!(r"^:?-+:?$").is_match(cell))
}

fn render_table(lines: &[&str]) -> String {
    // Prose before the first pipe row leads the table; the rest follows it.
    let first_row = lines
        .iter()
        .position(|line| line.contains('|'))
        .unwrap_or(lines.len());
    let (lead, rest) = lines.split_at(first_row);
    let mut rows = rest
        .iter()
        .filter(|line| line.contains('|'))
        .map(|&line| table_cells(line));
    let trailing: Vec<&str> = rest
        .iter()
        .filter(|line| !line.contains('|'))
        .copied()
        .collect();

    let mut html = String::new();
    if !lead.is_empty() {
        html.push_str(&format!("<p>{}</p>", lead.join(" ")));
    }
    html.push_str("<table>");
    if let Some(header) = rows.next() {
        html.push_str("<thead><tr>");
        for cell in header {
            html.push_str(&format!("<th>{cell}</th>"));
        }
        html.push_str("</tr></thead>");
    }
    let body: Vec<Vec<&str>> = rows.filter(|cells| !is_separator_row(cells)).collect();
    if !body.is_empty() {
        html.push_str("<tbody>");
        for row in body {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!("<td>{cell}</td>"));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody>");
    }
    html.push_str("</table>");
    if !trailing.is_empty() {
        html.push_str(&format!("<p>{}</p>", trailing.join(" ")));
    }
    html
}

fn render_list(lines: &[&str], ordered: bool) -> String {
    let mut lead: Vec<&str> = Vec::new();
    let mut items: Vec<String> = Vec::new();
    let mut start = None;

    for &line in lines {
        let item = match numbered_item(line) {
            Some((number, text)) => {
                start.get_or_insert(number);
                Some(text)
            }
            None => bullet_item(line),
        };
        match (item, items.last_mut()) {
            (Some(text), _) => items.push(text.to_string()),
            (None, Some(previous)) => {
                previous.push(' ');
                previous.push_str(line);
            }
            (None, None) => lead.push(line),
        }
    }

    let mut html = String::new();
    if !lead.is_empty() {
        html.push_str(&format!("<p>{}</p>", lead.join(" ")));
    }
    let open = match (ordered, start) {
        (true, Some(n)) if n != 1 => format!("<ol start=\"{n}\">"),
        (true, _) => "<ol>".to_string(),
        (false, _) => "<ul>".to_string(),
    };
    html.push_str(&open);
    for item in items {
        html.push_str(&format!("<li>{item}</li>"));
    }
    html.push_str(if ordered { "</ol>" } else { "</ul>" });
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::extract::BLOCK_PREFIX;

    fn render(text: &str) -> String {
        render_sections(text, &PlaceholderStore::for_source(BLOCK_PREFIX, ""))
    }

    #[test]
    fn single_numbered_line_is_a_paragraph() {
        assert_eq!(render("1. Buy milk"), "<p>1. Buy milk</p>");
    }

    #[test]
    fn bullets_become_an_unordered_list() {
        assert_eq!(
            render("- a\n- b\n- c"),
            "<ul><li>a</li><li>b</li><li>c</li></ul>"
        );
    }

    #[test]
    fn numbered_lines_from_one_become_an_ordered_list() {
        assert_eq!(
            render("1. one\n2. two"),
            "<ol><li>one</li><li>two</li></ol>"
        );
    }

    #[test]
    fn ordered_list_not_starting_at_one_keeps_its_start() {
        assert_eq!(classify(&["3. c", "2. b"]), SectionKind::List { ordered: true });
        assert_eq!(
            render("3. c\n4. d"),
            "<p>3. c 4. d</p>",
            "no number sits at its own position"
        );
        assert_eq!(
            render("5. e\n2. b"),
            "<ol start=\"5\"><li>e</li><li>b</li></ol>"
        );
    }

    #[test]
    fn single_bullet_is_a_paragraph() {
        assert_eq!(render("- lonely"), "<p>- lonely</p>");
    }

    #[test]
    fn continuation_lines_join_the_previous_item() {
        assert_eq!(
            render("- a\nmore about a\n- b"),
            "<ul><li>a more about a</li><li>b</li></ul>"
        );
    }

    #[test]
    fn lines_before_the_first_item_lead_the_list() {
        assert_eq!(
            render("Steps:\n1. one\n2. two"),
            "<p>Steps:</p><ol><li>one</li><li>two</li></ol>"
        );
    }

    #[test]
    fn mixed_bullets_and_numbers_render_ordered() {
        assert_eq!(
            render("- a\n- b\n7. c"),
            "<ol start=\"7\"><li>a</li><li>b</li><li>c</li></ol>"
        );
    }

    #[test]
    fn pipe_table_with_separator() {
        assert_eq!(
            render("| A | B |\n|---|---|\n| 1 | 2 |"),
            "<table><thead><tr><th>A</th><th>B</th></tr></thead>\
             <tbody><tr><td>1</td><td>2</td></tr></tbody></table>"
        );
    }

    #[test]
    fn aligned_separator_cells_are_skipped() {
        let html = render("| A | B |\n|:--|--:|\n| 1 | 2 |");
        assert!(!html.contains("--"), "{html}");
    }

    #[test]
    fn one_pipe_line_is_not_a_table() {
        assert_eq!(render("a | b | c"), "<p>a | b | c</p>");
    }

    #[test]
    fn non_pipe_lines_trail_the_table() {
        let html = render("| A | B |\n| 1 | 2 |\nsource: me");
        assert!(html.ends_with("</table><p>source: me</p>"), "{html}");
    }

    #[test]
    fn intro_line_stays_ahead_of_the_table() {
        let html = render("Here is a comparison:\n| A | B |\n|---|---|\n| 1 | 2 |\nNote below");
        assert!(html.starts_with("<p>Here is a comparison:</p><table>"), "{html}");
        assert!(html.ends_with("</table><p>Note below</p>"), "{html}");
    }

    #[test]
    fn headings_by_hash_count() {
        assert_eq!(render("# One"), "<h1>One</h1>");
        assert_eq!(render("## Two"), "<h2>Two</h2>");
        assert_eq!(render("### Three"), "<h3>Three</h3>");
        assert_eq!(render("##### Five"), "<h3>Five</h3>");
        assert_eq!(render("#hashtag"), "<p>#hashtag</p>");
    }

    #[test]
    fn escaped_blockquote() {
        assert_eq!(
            render("&gt; quoted\n&gt; more"),
            "<blockquote>quoted more</blockquote>"
        );
        assert_eq!(render("&gt;= 5 works"), "<p>&gt;= 5 works</p>");
    }

    #[test]
    fn paragraphs_join_lines_and_split_on_blank_lines() {
        assert_eq!(render("a\nb\n\n\nc"), "<p>a b</p>\n<p>c</p>");
    }

    #[test]
    fn block_tokens_are_emitted_bare() {
        let mut blocks = PlaceholderStore::for_source(BLOCK_PREFIX, "");
        let token = blocks.insert("<pre></pre>".into());
        let text = format!("intro\n{token}\noutro");
        assert_eq!(
            render_sections(&text, &blocks),
            format!("<p>intro</p>\n{token}\n<p>outro</p>")
        );
    }

    #[test]
    fn empty_text_renders_nothing() {
        assert_eq!(render("\n  \n"), "");
    }
}
