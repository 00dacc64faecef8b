use anyhow::{Context, Result};
use switchboard_config::SwitchboardConfig;

/// Print the effective configuration.
pub fn execute(config: &SwitchboardConfig) -> Result<()> {
    print!("{}", render(config)?);
    Ok(())
}

pub fn render(config: &SwitchboardConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize configuration")
}
