//! Supported highlight languages and label normalization.

use std::fmt;

/// Languages with a dedicated highlight rule table.
///
/// `Generic` is the fallback for unknown labels and undetected code: it only
/// highlights numbers, strings and comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Html,
    Css,
    Json,
    Shell,
    Sql,
    C,
    Java,
    Go,
    Rust,
    Php,
    Ruby,
    Swift,
    Kotlin,
    CSharp,
    Dart,
    Generic,
}

impl Language {
    /// Resolve a fence label or language hint to a language.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Unknown labels resolve to [`Language::Generic`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" | "jsx" | "mjs" | "cjs" | "node" => Self::JavaScript,
            "typescript" | "ts" | "tsx" => Self::TypeScript,
            "python" | "py" | "python3" | "py3" => Self::Python,
            "html" | "htm" | "xml" | "xhtml" | "svg" => Self::Html,
            "css" | "scss" | "less" => Self::Css,
            "json" | "jsonc" | "json5" => Self::Json,
            "shell" | "sh" | "bash" | "zsh" | "console" | "shellscript" => Self::Shell,
            "sql" | "mysql" | "postgresql" | "postgres" | "sqlite" => Self::Sql,
            "c" | "cpp" | "c++" | "cc" | "cxx" | "h" | "hpp" => Self::C,
            "java" => Self::Java,
            "go" | "golang" => Self::Go,
            "rust" | "rs" => Self::Rust,
            "php" => Self::Php,
            "ruby" | "rb" => Self::Ruby,
            "swift" => Self::Swift,
            "kotlin" | "kt" | "kts" => Self::Kotlin,
            "csharp" | "cs" | "c#" => Self::CSharp,
            "dart" | "flutter" => Self::Dart,
            _ => Self::Generic,
        }
    }

    /// Canonical lowercase tag, used in CSS class names and code-block headers.
    pub fn tag(self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Python => "python",
            Self::Html => "html",
            Self::Css => "css",
            Self::Json => "json",
            Self::Shell => "shell",
            Self::Sql => "sql",
            Self::C => "c",
            Self::Java => "java",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Php => "php",
            Self::Ruby => "ruby",
            Self::Swift => "swift",
            Self::Kotlin => "kotlin",
            Self::CSharp => "csharp",
            Self::Dart => "dart",
            Self::Generic => "generic",
        }
    }

    /// How this language's code is re-indented before highlighting.
    pub fn indent_style(self) -> IndentStyle {
        match self {
            Self::JavaScript
            | Self::TypeScript
            | Self::C
            | Self::Java
            | Self::Go
            | Self::Rust
            | Self::Php
            | Self::Swift
            | Self::Kotlin
            | Self::CSharp
            | Self::Dart => IndentStyle::Brace,
            Self::Python => IndentStyle::Colon,
            Self::Html
            | Self::Css
            | Self::Json
            | Self::Shell
            | Self::Sql
            | Self::Ruby
            | Self::Generic => IndentStyle::Preserve,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Re-indentation pass applied to a language before pattern substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    /// C-family: depth follows `{` / `}`.
    Brace,
    /// Python-family: depth follows trailing `:` and dedent keywords.
    Colon,
    /// Leave whitespace as written.
    Preserve,
}
