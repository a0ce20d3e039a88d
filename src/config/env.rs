//! Environment overrides.
//!
//! `CHATMARK_*` variables override values read from the config file. Blank
//! values are treated as unset.

use crate::error::ConfigError;

use super::{Config, OutputMode};

pub(super) const ENV_OUTPUT: &str = "CHATMARK_OUTPUT";
pub(super) const ENV_TITLE: &str = "CHATMARK_TITLE";
pub(super) const ENV_STYLESHEET: &str = "CHATMARK_STYLESHEET";
pub(super) const ENV_LOG: &str = "CHATMARK_LOG";

pub(super) fn apply_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(mode) = non_blank(env_lookup, ENV_OUTPUT) {
        config.output.mode = mode
            .parse::<OutputMode>()
            .map_err(|e| ConfigError::Invalid(format!("{ENV_OUTPUT}: {e}")))?;
    }
    if let Some(title) = non_blank(env_lookup, ENV_TITLE) {
        config.output.title = title;
    }
    if let Some(href) = non_blank(env_lookup, ENV_STYLESHEET) {
        config.output.stylesheet = Some(href);
    }
    if let Some(filter) = non_blank(env_lookup, ENV_LOG) {
        config.logging.filter = filter;
    }
    Ok(())
}

fn non_blank<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name).filter(|value| !value.trim().is_empty())
}
