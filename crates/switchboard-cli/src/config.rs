//! Configuration resolution for the CLI
//!
//! Order: built-in defaults, config file, environment, then `--api-base`.

use anyhow::{Context, Result};
use std::path::PathBuf;
use switchboard_config::{ConfigLoader, SwitchboardConfig};
use tracing::debug;

/// `~/.config/switchboard/config.toml` on Linux, the platform equivalent elsewhere
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("switchboard").join("config.toml"))
}

/// Load the effective configuration.
///
/// An explicit path must exist; the default path is used only when present.
pub async fn load(explicit: Option<PathBuf>, api_base: Option<String>) -> Result<SwitchboardConfig> {
    let path = explicit.or_else(|| default_config_path().filter(|path| path.exists()));
    debug!(path = ?path, "Resolving configuration");

    let mut config = ConfigLoader::load(path.as_deref())
        .await
        .context("Failed to load configuration")?;

    if let Some(base) = api_base {
        config.api.base_url = base;
        config.validate().context("Invalid --api-base")?;
    }

    Ok(config)
}
