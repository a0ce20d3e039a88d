//! Per-language highlight rule tables.
//!
//! Tables are ordered: comments and string literals first so they claim their
//! text, then language-specific markers, then keywords, types, function calls
//! and numbers. Patterns match escaped text, so quotes appear as `&quot;` and
//! `&#39;` and angle brackets as `&lt;` / `&gt;`.

use super::language::Language;
use super::rules::{Category, RuleSpec};

const LINE_COMMENT: &str = r"//.*";
const BLOCK_COMMENT: &str = r"(?s)/\*.*?\*/";
const HASH_COMMENT: &str = r"(?m)(?:^|[^&$\w{])(?P<hl>#.*)";
const DOUBLE_QUOTED: &str = r"&quot;(?:\\.|[^&\\\n]|&(?:amp|lt|gt|#39);)*&quot;";
const SINGLE_QUOTED: &str = r"&#39;(?:\\.|[^&\\\n]|&(?:amp|lt|gt|quot);)*&#39;";
const CHAR_LITERAL: &str = r"&#39;(?:\\.|[^&\\]|&[a-z]+;|&#\d+;)&#39;";
const BACKTICK_QUOTED: &str = r"`(?:\\.|[^`])*`";
const NUMBER: &str = r"\b(?:0[xX][0-9a-fA-F_]+|0[bB][01_]+|\d[\d_]*(?:\.\d+)?(?:[eE][+-]?\d+)?)\b";
const FUNCTION_CALL: &str = r"\b(?P<hl>[A-Za-z_]\w*)\s*\(";
const CAPITALIZED: &str = r"\b[A-Z][A-Za-z0-9_]*\b";
const ANNOTATION: &str = r"@[A-Za-z_][\w.]*";

fn rule(pattern: &str, category: Category) -> RuleSpec {
    RuleSpec::new(pattern, category)
}

/// `/* */` comments, string literals, then `//` comments.
///
/// Strings run before line comments so `"http://..."` stays a string.
fn c_style_prelude(extra_strings: &[&str]) -> Vec<RuleSpec> {
    let mut rules = vec![
        rule(BLOCK_COMMENT, Category::Comment),
        rule(DOUBLE_QUOTED, Category::String),
    ];
    rules.extend(
        extra_strings
            .iter()
            .map(|pattern| rule(pattern, Category::String)),
    );
    rules.push(rule(LINE_COMMENT, Category::Comment));
    rules
}

/// Function calls, capitalized type names and numbers.
fn code_tail(extra_types: &[&str]) -> Vec<RuleSpec> {
    let mut rules = Vec::new();
    if !extra_types.is_empty() {
        rules.push(RuleSpec::words(extra_types, Category::Type));
    }
    rules.push(rule(FUNCTION_CALL, Category::Function));
    rules.push(rule(CAPITALIZED, Category::Type));
    rules.push(rule(NUMBER, Category::Number));
    rules
}

/// Build the ordered rule table for `language`.
pub fn rule_table(language: Language) -> Vec<RuleSpec> {
    match language {
        Language::JavaScript => javascript(),
        Language::TypeScript => typescript(),
        Language::Python => python(),
        Language::Html => html(),
        Language::Css => css(),
        Language::Json => json(),
        Language::Shell => shell(),
        Language::Sql => sql(),
        Language::C => c_family(),
        Language::Java => java(),
        Language::Go => go(),
        Language::Rust => rust(),
        Language::Php => php(),
        Language::Ruby => ruby(),
        Language::Swift => swift(),
        Language::Kotlin => kotlin(),
        Language::CSharp => csharp(),
        Language::Dart => dart(),
        Language::Generic => generic(),
    }
}

const JS_KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "finally", "for", "from", "function",
    "get", "if", "import", "in", "instanceof", "let", "new", "of", "return", "set", "static",
    "super", "switch", "this", "throw", "try", "typeof", "var", "void", "while", "with", "yield",
    "true", "false", "null", "undefined", "NaN",
];

fn js_literals() -> Vec<RuleSpec> {
    c_style_prelude(&[SINGLE_QUOTED, BACKTICK_QUOTED])
}

fn js_code() -> Vec<RuleSpec> {
    let mut rules = vec![RuleSpec::words(JS_KEYWORDS, Category::Keyword)];
    rules.extend(code_tail(&[]));
    rules
}

fn javascript() -> Vec<RuleSpec> {
    let mut rules = js_literals();
    rules.extend(js_code());
    rules
}

/// TypeScript's own rules slot in between the shared literal rules and the
/// JavaScript keyword rules, so the code is highlighted in a single pass.
fn typescript() -> Vec<RuleSpec> {
    let mut rules = js_literals();
    rules.push(RuleSpec::words(
        &[
            "interface", "type", "enum", "implements", "namespace", "declare", "abstract",
            "readonly", "private", "public", "protected", "keyof", "infer", "is", "asserts",
            "satisfies", "as",
        ],
        Category::Keyword,
    ));
    rules.push(rule(
        r"(?:[:|&]|&lt;|\bas)\s*(?P<hl>string|number|boolean|any|void|unknown|never|object|bigint|symbol)\b",
        Category::Type,
    ));
    rules.push(rule(ANNOTATION, Category::Attribute));
    rules.extend(js_code());
    rules
}

fn python() -> Vec<RuleSpec> {
    let mut rules = vec![
        rule(r"(?s)&quot;&quot;&quot;.*?&quot;&quot;&quot;", Category::String),
        rule(r"(?s)&#39;&#39;&#39;.*?&#39;&#39;&#39;", Category::String),
        rule(DOUBLE_QUOTED, Category::String),
        rule(SINGLE_QUOTED, Category::String),
        rule(HASH_COMMENT, Category::Comment),
        rule(r"(?m)^\s*(?P<hl>@[\w.]+)", Category::Attribute),
        RuleSpec::words(
            &[
                "and", "as", "assert", "async", "await", "break", "class", "continue", "def",
                "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
                "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise",
                "return", "try", "while", "with", "yield", "True", "False", "None",
            ],
            Category::Keyword,
        ),
        RuleSpec::words(&["self", "cls"], Category::Variable),
    ];
    rules.extend(code_tail(&[
        "int", "str", "float", "bool", "list", "dict", "set", "tuple", "bytes", "object",
    ]));
    rules
}

fn html() -> Vec<RuleSpec> {
    vec![
        rule(r"(?s)&lt;!--.*?--&gt;", Category::Comment),
        rule(r"(?i)&lt;!doctype[^&]*&gt;", Category::Tag),
        rule(
            r"=\s*(?P<hl>&quot;(?:.|\n)*?&quot;|&#39;(?:.|\n)*?&#39;)",
            Category::String,
        ),
        rule(r"&lt;/?[A-Za-z][\w:-]*|/?&gt;", Category::Tag),
        rule(r"\s(?P<hl>[A-Za-z_:][\w:.-]*)\s*=", Category::Attribute),
    ]
}

fn css() -> Vec<RuleSpec> {
    vec![
        rule(BLOCK_COMMENT, Category::Comment),
        rule(DOUBLE_QUOTED, Category::String),
        rule(SINGLE_QUOTED, Category::String),
        rule(r"@[\w-]+", Category::Keyword),
        rule(r"(?P<hl>--?[A-Za-z][\w-]*|[A-Za-z][\w-]*)\s*:[^;{}]*;", Category::Property),
        rule(r":\s*(?P<hl>[^;{}\s][^;{}]*?)\s*;", Category::Value),
        rule(r"#[0-9a-fA-F]{3,8}\b", Category::Number),
        rule(
            r"\b\d+(?:\.\d+)?(?:px|em|rem|vh|vw|vmin|vmax|pt|ch|ex|deg|ms|s|fr)?\b|\b\d+(?:\.\d+)?%",
            Category::Number,
        ),
    ]
}

fn json() -> Vec<RuleSpec> {
    vec![
        rule(&format!(r"(?P<hl>{DOUBLE_QUOTED})\s*:"), Category::JsonKey),
        rule(DOUBLE_QUOTED, Category::JsonString),
        rule(r"-?\b\d+(?:\.\d+)?(?:[eE][+-]?\d+)?\b", Category::JsonNumber),
        RuleSpec::words(&["true", "false", "null"], Category::JsonBoolean),
    ]
}

fn shell() -> Vec<RuleSpec> {
    vec![
        rule(DOUBLE_QUOTED, Category::String),
        rule(SINGLE_QUOTED, Category::String),
        rule(HASH_COMMENT, Category::Comment),
        rule(r"\$\{[^}]*\}|\$[A-Za-z_]\w*|\$[0-9@#?*$!]", Category::Variable),
        RuleSpec::words(
            &[
                "if", "then", "else", "elif", "fi", "for", "while", "until", "do", "done",
                "case", "esac", "function", "in", "return", "local", "export", "set",
                "unset", "readonly", "shift", "exit",
            ],
            Category::Keyword,
        ),
        RuleSpec::words(
            &[
                "sudo", "apt", "apt-get", "brew", "npm", "npx", "yarn", "pnpm", "pip", "pip3",
                "cargo", "cd", "ls", "echo", "mkdir", "rm", "cp", "mv", "chmod", "chown", "git",
                "curl", "wget", "source", "docker", "kubectl", "tar", "grep", "cat", "sed",
                "awk", "find", "touch", "python", "python3", "node", "make", "ssh",
            ],
            Category::ShellCommand,
        ),
        rule(r"(?:^|\s)(?P<hl>--?[A-Za-z][\w-]*)", Category::ShellFlag),
        rule(r"\b\d+\b", Category::Number),
    ]
}

fn sql() -> Vec<RuleSpec> {
    vec![
        rule(BLOCK_COMMENT, Category::Comment),
        rule(SINGLE_QUOTED, Category::SqlString),
        rule(DOUBLE_QUOTED, Category::SqlString),
        rule(r"--.*", Category::Comment),
        rule(
            r"(?i)\b(?P<hl>count|sum|avg|min|max|coalesce|nullif|concat|substring|lower|upper|length|round|now|cast|date|ifnull|row_number|rank)\s*\(",
            Category::SqlFunction,
        ),
        RuleSpec::words_ci(
            &[
                "select", "from", "where", "insert", "into", "values", "update", "set",
                "delete", "create", "alter", "drop", "table", "index", "view", "database",
                "join", "inner", "left", "right", "outer", "full", "cross", "on", "and", "or",
                "not", "null", "is", "in", "like", "between", "exists", "as", "distinct",
                "group", "by", "order", "having", "limit", "offset", "union", "all", "case",
                "when", "then", "else", "end", "primary", "key", "foreign", "references",
                "default", "unique", "asc", "desc", "with", "returning", "begin", "commit",
                "rollback", "transaction",
            ],
            Category::SqlKeyword,
        ),
        rule(r"\b\d+(?:\.\d+)?\b", Category::Number),
    ]
}

fn c_family() -> Vec<RuleSpec> {
    let mut rules = c_style_prelude(&[CHAR_LITERAL]);
    rules.push(rule(r"(?m)^\s*(?P<hl>#\s*[a-z]+)", Category::Attribute));
    rules.push(RuleSpec::words(
        &[
            "auto", "break", "case", "catch", "class", "const", "constexpr", "continue",
            "default", "delete", "do", "else", "enum", "explicit", "extern", "for", "friend",
            "goto", "if", "inline", "namespace", "new", "noexcept", "nullptr", "operator",
            "private", "protected", "public", "register", "return", "sizeof", "static",
            "struct", "switch", "template", "this", "throw", "try", "typedef", "typename",
            "union", "using", "virtual", "volatile", "while", "true", "false", "NULL",
        ],
        Category::Keyword,
    ));
    rules.extend(code_tail(&[
        "int", "char", "float", "double", "void", "long", "short", "unsigned", "signed", "bool",
        "size_t", "std", "string", "vector", "map", "uint8_t", "uint16_t", "uint32_t",
        "uint64_t", "int8_t", "int16_t", "int32_t", "int64_t",
    ]));
    rules
}

fn java() -> Vec<RuleSpec> {
    let mut rules = c_style_prelude(&[SINGLE_QUOTED]);
    rules.push(rule(ANNOTATION, Category::Attribute));
    rules.push(RuleSpec::words(
        &[
            "abstract", "assert", "break", "case", "catch", "class", "continue", "default", "do",
            "else", "enum", "extends", "final", "finally", "for", "if", "implements", "import",
            "instanceof", "interface", "native", "new", "package", "private", "protected",
            "public", "record", "return", "static", "super", "switch", "synchronized", "this",
            "throw", "throws", "try", "var", "volatile", "while", "true", "false", "null",
        ],
        Category::Keyword,
    ));
    rules.extend(code_tail(&[
        "int", "long", "short", "byte", "char", "float", "double", "boolean", "void",
    ]));
    rules
}

fn go() -> Vec<RuleSpec> {
    let mut rules = c_style_prelude(&[BACKTICK_QUOTED, SINGLE_QUOTED]);
    rules.push(RuleSpec::words(
        &[
            "break", "case", "chan", "const", "continue", "default", "defer", "else",
            "fallthrough", "for", "func", "go", "goto", "if", "import", "interface", "map",
            "package", "range", "return", "select", "struct", "switch", "type", "var", "true",
            "false", "nil", "iota",
        ],
        Category::Keyword,
    ));
    rules.extend(code_tail(&[
        "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64",
        "float32", "float64", "string", "bool", "byte", "rune", "error", "any",
    ]));
    rules
}

fn rust() -> Vec<RuleSpec> {
    let mut rules = c_style_prelude(&[CHAR_LITERAL]);
    rules.push(rule(r"&#39;[A-Za-z_]\w*", Category::Variable));
    rules.push(rule(r"#!?\[[^\]]*\]", Category::Attribute));
    rules.push(rule(r"\b(?P<hl>[a-z_][a-z0-9_]*!)\s*[(\[{]", Category::Function));
    rules.push(RuleSpec::words(
        &[
            "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else",
            "enum", "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod",
            "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super",
            "trait", "type", "unsafe", "use", "where", "while", "true", "false",
        ],
        Category::Keyword,
    ));
    rules.extend(code_tail(&[
        "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
        "f32", "f64", "bool", "char", "str",
    ]));
    rules
}

fn php() -> Vec<RuleSpec> {
    let mut rules = c_style_prelude(&[SINGLE_QUOTED]);
    rules.push(rule(HASH_COMMENT, Category::Comment));
    rules.push(rule(r"&lt;\?php|\?&gt;", Category::Tag));
    rules.push(rule(r"\$[A-Za-z_]\w*", Category::Variable));
    rules.push(RuleSpec::words(
        &[
            "abstract", "array", "as", "break", "case", "catch", "class", "const", "continue",
            "default", "do", "echo", "else", "elseif", "extends", "final", "finally", "fn",
            "for", "foreach", "function", "global", "if", "implements", "include", "interface",
            "match", "namespace", "new", "print", "private", "protected", "public", "require",
            "require_once", "return", "static", "switch", "throw", "trait", "try", "use", "var",
            "while", "yield", "true", "false", "null",
        ],
        Category::Keyword,
    ));
    rules.extend(code_tail(&["int", "float", "string", "bool", "void", "mixed"]));
    rules
}

fn ruby() -> Vec<RuleSpec> {
    let mut rules = vec![
        rule(r"(?ms)^=begin.*?^=end", Category::Comment),
        rule(DOUBLE_QUOTED, Category::String),
        rule(SINGLE_QUOTED, Category::String),
        rule(HASH_COMMENT, Category::Comment),
        rule(r"(?:^|[^:\w])(?P<hl>:[A-Za-z_]\w*[?!]?)", Category::Value),
        rule(r"@{1,2}[A-Za-z_]\w*", Category::Variable),
        RuleSpec::words(
            &[
                "alias", "and", "begin", "break", "case", "class", "def", "do",
                "else", "elsif", "end", "ensure", "for", "if", "in", "module", "next", "not",
                "or", "redo", "rescue", "retry", "return", "self", "super", "then", "unless",
                "until", "when", "while", "yield", "nil", "true", "false", "require",
                "attr_accessor", "attr_reader", "attr_writer", "puts", "lambda", "proc",
            ],
            Category::Keyword,
        ),
    ];
    rules.extend(code_tail(&[]));
    rules
}

fn swift() -> Vec<RuleSpec> {
    let mut rules = c_style_prelude(&[]);
    rules.push(rule(ANNOTATION, Category::Attribute));
    rules.push(RuleSpec::words(
        &[
            "actor", "as", "associatedtype", "async", "await", "break", "case", "catch", "class",
            "continue", "default", "defer", "do", "else", "enum", "extension", "fallthrough",
            "fileprivate", "for", "func", "guard", "if", "import", "in", "init", "inout",
            "internal", "is", "let", "mutating", "open", "private", "protocol", "public",
            "repeat", "return", "self", "Self", "static", "struct", "subscript", "super",
            "switch", "throw", "throws", "try", "var", "where", "while", "true", "false", "nil",
        ],
        Category::Keyword,
    ));
    rules.extend(code_tail(&[]));
    rules
}

fn kotlin() -> Vec<RuleSpec> {
    let mut rules = c_style_prelude(&[SINGLE_QUOTED]);
    rules.push(rule(ANNOTATION, Category::Attribute));
    rules.push(RuleSpec::words(
        &[
            "abstract", "as", "break", "by", "catch", "class", "companion", "const",
            "constructor", "continue", "data", "do", "else", "enum", "false", "final",
            "finally", "for", "fun", "if", "import", "in", "init", "inner", "interface",
            "internal", "is", "lateinit", "null", "object", "open", "override", "package",
            "private", "protected", "public", "return", "sealed", "super", "suspend", "this",
            "throw", "true", "try", "typealias", "val", "var", "when", "while",
        ],
        Category::Keyword,
    ));
    rules.extend(code_tail(&[]));
    rules
}

fn csharp() -> Vec<RuleSpec> {
    let mut rules = vec![
        rule(BLOCK_COMMENT, Category::Comment),
        rule(r"[@$]+&quot;(?:&quot;&quot;|.)*?&quot;", Category::String),
        rule(DOUBLE_QUOTED, Category::String),
        rule(SINGLE_QUOTED, Category::String),
        rule(LINE_COMMENT, Category::Comment),
        rule(r"(?m)^\s*(?P<hl>\[[A-Z]\w*(?:\([^)\]]*\))?\])", Category::Attribute),
    ];
    rules.push(RuleSpec::words(
        &[
            "abstract", "as", "async", "await", "base", "break", "case", "catch", "class",
            "const", "continue", "default", "delegate", "do", "else", "enum", "event",
            "explicit", "extern", "finally", "fixed", "for", "foreach", "get", "if",
            "implicit", "in", "interface", "internal", "is", "lock", "namespace", "new",
            "operator", "out", "override", "params", "private", "protected", "public",
            "readonly", "record", "ref", "return", "sealed", "set", "static", "struct",
            "switch", "this", "throw", "try", "typeof", "using", "var", "virtual", "void",
            "while", "true", "false", "null",
        ],
        Category::Keyword,
    ));
    rules.extend(code_tail(&[
        "int", "long", "short", "byte", "char", "float", "double", "decimal", "bool", "string",
        "object", "dynamic",
    ]));
    rules
}

fn dart() -> Vec<RuleSpec> {
    let mut rules = c_style_prelude(&[SINGLE_QUOTED]);
    rules.push(rule(ANNOTATION, Category::Attribute));
    rules.push(RuleSpec::words(
        &[
            "abstract", "as", "async", "await", "break", "case", "catch", "class", "const",
            "continue", "default", "do", "else", "enum", "extends", "factory", "final",
            "finally", "for", "if", "implements", "import", "in", "is", "late", "library",
            "mixin", "new", "required", "return", "static", "super", "switch", "this", "throw",
            "try", "var", "void", "while", "with", "yield", "true", "false", "null",
        ],
        Category::Keyword,
    ));
    rules.extend(code_tail(&["int", "double", "num", "bool", "dynamic"]));
    rules
}

/// Fallback: comments, strings and numbers only.
fn generic() -> Vec<RuleSpec> {
    vec![
        rule(BLOCK_COMMENT, Category::Comment),
        rule(DOUBLE_QUOTED, Category::String),
        rule(SINGLE_QUOTED, Category::String),
        rule(LINE_COMMENT, Category::Comment),
        rule(HASH_COMMENT, Category::Comment),
        rule(NUMBER, Category::Number),
    ]
}
