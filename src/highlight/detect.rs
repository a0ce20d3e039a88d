//! Heuristic language detection for code without a fence label.
//!
//! Detection walks an ordered fingerprint table and stops at the first hit.
//! Order is part of the contract: broad fingerprints (CSS braces, shell
//! commands) sit late so narrower ones get a chance first. This is guessing,
//! not parsing. A JSON document whose strings contain `const x =` will be
//! reported as JavaScript because the JavaScript fingerprint runs earlier.

use super::language::Language;

/// One entry of the detection table.
struct Fingerprint {
    /// Name used in trace output.
    name: &'static str,
    /// Returns the detected language when the fingerprint matches.
    probe: fn(&str) -> Option<Language>,
}

const FINGERPRINTS: &[Fingerprint] = &[
    Fingerprint {
        name: "javascript",
        probe: probe_javascript,
    },
    Fingerprint {
        name: "python",
        probe: probe_python,
    },
    Fingerprint {
        name: "html",
        probe: probe_html,
    },
    Fingerprint {
        name: "css",
        probe: probe_css,
    },
    Fingerprint {
        name: "json",
        probe: probe_json,
    },
    Fingerprint {
        name: "shell",
        probe: probe_shell,
    },
    Fingerprint {
        name: "sql",
        probe: probe_sql,
    },
];

/// Guess the language of an unlabeled code fragment.
///
/// Returns [`Language::Generic`] for empty input or when no fingerprint
/// matches.
pub fn detect_language(code: &str) -> Language {
    let code = code.trim();
    if code.is_empty() {
        return Language::Generic;
    }
    for fingerprint in FINGERPRINTS {
        if let Some(language) = (fingerprint.probe)(code) {
            tracing::trace!(fingerprint = fingerprint.name, %language, "language fingerprint matched");
            return language;
        }
    }
    Language::Generic
}

fn probe_javascript(code: &str) -> Option<Language> {
    let js = cached_regex!(
        r"\bfunction\s*\*?\s*\w*\s*\(|\b(?:const|let|var)\s+[\w$]+\s*=|=>|\bconsole\.(?:log|error|warn|info)\b|\bdocument\.|\brequire\(|\bmodule\.exports\b|\bexport\s+(?:default|const|function|class)\b"
    );
    if !js.is_match(code) {
        return None;
    }
    if looks_like_typescript(code) {
        Some(Language::TypeScript)
    } else {
        Some(Language::JavaScript)
    }
}

/// Type-annotation or declaration syntax that only TypeScript accepts.
fn looks_like_typescript(code: &str) -> bool {
    let ts = cached_regex!(
        r"\binterface\s+\w+|\btype\s+\w+\s*=|[\w)]\s*:\s*(?:string|number|boolean|any|void|unknown|never)\b|\b(?:public|private|protected|readonly)\s+\w+\s*:|\bas\s+(?:string|number|const|any)\b|\benum\s+\w+\s*\{"
    );
    ts.is_match(code)
}

fn probe_python(code: &str) -> Option<Language> {
    let py = cached_regex!(
        r"(?m)^\s*(?:def\s+\w+\s*\(|class\s+\w+\s*(?:\([^)]*\))?\s*:|import\s+\w+|from\s+[\w.]+\s+import\s|elif\s|if\s+__name__\s*==)|\bprint\(|\bself\."
    );
    py.is_match(code).then_some(Language::Python)
}

fn probe_html(code: &str) -> Option<Language> {
    let html = cached_regex!(
        r"(?i)<(?:!doctype|html|head|body|div|span|p|a|ul|ol|li|table|tr|td|script|style|h[1-6]|form|input|button|img|section|nav|header|footer|main)\b[^>]*>|</[a-z][\w-]*>"
    );
    html.is_match(code).then_some(Language::Html)
}

fn probe_css(code: &str) -> Option<Language> {
    let css = cached_regex!(r"(?s)[\w.#*\]:>~+-][^{};]*\{\s*[\w-]+\s*:\s*[^;{}]+;");
    css.is_match(code).then_some(Language::Css)
}

/// JSON needs a container shape first, then a strict parse.
///
/// Bare scalars (`"text"`, `42`) are valid JSON but are never reported.
fn probe_json(code: &str) -> Option<Language> {
    let bracketed = (code.starts_with('{') && code.ends_with('}'))
        || (code.starts_with('[') && code.ends_with(']'));
    if !bracketed {
        return None;
    }
    serde_json::from_str::<serde_json::Value>(code)
        .ok()
        .map(|_| Language::Json)
}

fn probe_shell(code: &str) -> Option<Language> {
    let shell = cached_regex!(
        r"(?m)^#!\s*/\S*(?:ba|z|da)?sh\b|^#!\s*/usr/bin/env\s+(?:ba|z)?sh\b|^\s*(?:\$\s+)?(?:sudo|apt|apt-get|brew|npm|npx|yarn|pnpm|pip|pip3|cargo|cd|ls|echo|mkdir|rm|cp|mv|chmod|chown|git|curl|wget|export|source|docker|kubectl|tar|grep|cat)\s"
    );
    shell.is_match(code).then_some(Language::Shell)
}

fn probe_sql(code: &str) -> Option<Language> {
    let sql = cached_regex!(
        r"(?is)\b(?:select\s+.+?\s+from|insert\s+into|update\s+\w+\s+set|delete\s+from|create\s+(?:table|index|view|database)|alter\s+table|drop\s+table)\b"
    );
    sql.is_match(code).then_some(Language::Sql)
}
