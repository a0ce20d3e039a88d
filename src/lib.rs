//! chatmark: render raw chat-model output as structured, highlighted HTML.
//!
//! Model replies mix Markdown, LaTeX symbols, fenced code and pipe tables.
//! This crate turns that text into an HTML fragment that is safe to insert
//! into a trusted page: prose is escaped exactly once, code blocks are
//! re-indented and highlighted with category spans, and sections are
//! classified into paragraphs, lists, tables, headings and blockquotes.
//!
//! # Quick start
//!
//! ```
//! use chatmark::render::render_message;
//!
//! let html = render_message("Hello **world**");
//! assert_eq!(html, "<p>Hello <strong>world</strong></p>");
//! ```

/// Compile a static regex pattern once and hand out a `&'static Regex`.
macro_rules! cached_regex {
    ($pattern:expr) => {{
        static CELL: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        CELL.get_or_init(|| regex::Regex::new($pattern).expect("static regex pattern compiles"))
    }};
}

pub mod config;
pub mod document;
pub mod error;
pub mod highlight;
pub mod logging;
pub mod render;
pub mod textutil;
pub mod transcript;
