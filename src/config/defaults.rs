//! Default configuration constants.

/// Page title used when document output has no configured title.
pub(super) const DEFAULT_TITLE: &str = "Conversation";
/// `tracing` filter used when neither env nor config sets one.
pub(super) const DEFAULT_LOG_FILTER: &str = "warn";
/// Config file looked up in the working directory.
pub(super) const LOCAL_CONFIG_FILE: &str = "chatmark.toml";
/// Directory under the config root holding the global config file.
pub(super) const CONFIG_DIR_NAME: &str = "chatmark";
