//! Configuration data model.
//!
//! Only struct/enum definitions and their defaults live here. Source
//! discovery and precedence stay in `config::mod`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults::{DEFAULT_LOG_FILTER, DEFAULT_TITLE};

/// Whether rendered HTML is emitted bare or wrapped in a full page.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Fragment,
    Document,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fragment" => Ok(Self::Fragment),
            "document" => Ok(Self::Document),
            other => Err(format!(
                "unknown output mode `{other}`: expected `fragment` or `document`"
            )),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fragment => f.write_str("fragment"),
            Self::Document => f.write_str("document"),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// How rendered output is packaged.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub mode: OutputMode,
    /// `<title>` of document output.
    pub title: String,
    /// Optional stylesheet href linked from document output.
    pub stylesheet: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::Fragment,
            title: DEFAULT_TITLE.to_string(),
            stylesheet: None,
        }
    }
}

/// Diagnostic logging settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Replace blank strings with their defaults.
    pub(super) fn normalize(&mut self) {
        if self.output.title.trim().is_empty() {
            self.output.title = DEFAULT_TITLE.to_string();
        }
        if self
            .output
            .stylesheet
            .as_deref()
            .is_some_and(|href| href.trim().is_empty())
        {
            self.output.stylesheet = None;
        }
        if self.logging.filter.trim().is_empty() {
            self.logging.filter = DEFAULT_LOG_FILTER.to_string();
        }
    }
}

/// Where the loaded configuration text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicit `--config` path.
    Explicit(PathBuf),
    /// `./chatmark.toml`.
    Local,
    /// `<config root>/chatmark/chatmark.toml`.
    Global(PathBuf),
    /// No file found; defaults were used.
    BuiltInDefaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) | Self::Global(path) => write!(f, "{}", path.display()),
            Self::Local => f.write_str("./chatmark.toml"),
            Self::BuiltInDefaults => f.write_str("built-in defaults"),
        }
    }
}

/// Loaded configuration plus the source it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}
