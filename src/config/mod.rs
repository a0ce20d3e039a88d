//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Command-line flags (applied by the binary after loading)
//! 2. Environment variables (`CHATMARK_OUTPUT`, `CHATMARK_TITLE`,
//!    `CHATMARK_STYLESHEET`, `CHATMARK_LOG`)
//! 3. TOML file specified via --config CLI flag
//! 4. ./chatmark.toml in the current directory
//! 5. $XDG_CONFIG_HOME/chatmark/chatmark.toml (or ~/.config/chatmark/chatmark.toml)
//! 6. Built-in defaults
//!
//! The rendering functions take no configuration; this only shapes how the
//! binary packages and logs its output.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

mod defaults;
mod env;
mod sources;
mod types;

pub use types::{Config, ConfigSource, LoadedConfig, LoggingConfig, OutputConfig, OutputMode};

use env::apply_env_overrides;
use sources::read_config_text_with_sources;

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

pub(crate) fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    let mut config: Config = toml::from_str(&config_text)?;
    apply_env_overrides(&mut config, &env_lookup)?;
    config.normalize();
    tracing::debug!(%source, mode = %config.output.mode, "loaded config");
    Ok(LoadedConfig { config, source })
}

/// Root directory holding per-application config directories.
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
