//! LaTeX symbol commands that models emit outside math mode.

/// Command → Unicode replacements, applied in order.
const SYMBOLS: &[(&str, &str)] = &[
    (r"\pentagon", "⬟"),
    (r"\triangle", "△"),
    (r"\square", "□"),
    (r"\diamond", "◇"),
    (r"\nabla", "∇"),
];

/// Replace the known LaTeX symbol commands with their Unicode glyphs.
pub fn substitute_symbols(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_string();
    }
    SYMBOLS
        .iter()
        .fold(text.to_string(), |acc, (command, glyph)| {
            acc.replace(command, glyph)
        })
}
