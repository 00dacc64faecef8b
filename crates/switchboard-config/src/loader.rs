//! Configuration loading
//!
//! Resolution order: built-in defaults, then the config file (if any), then
//! environment overrides. The result is validated before it is returned.

use crate::{ConfigError, SwitchboardConfig};
use std::path::Path;
use tracing::{debug, info};

/// Overrides `api.base_url`
pub const ENV_API_BASE: &str = "SWITCHBOARD_API_BASE";

/// Overrides `api.timeout_secs`
pub const ENV_API_TIMEOUT_SECS: &str = "SWITCHBOARD_API_TIMEOUT_SECS";

/// Loads [`SwitchboardConfig`] from files and the environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration, optionally from a file, then apply environment overrides.
    pub async fn load(path: Option<&Path>) -> Result<SwitchboardConfig, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path).await?,
            None => {
                debug!("No config file given, using defaults");
                SwitchboardConfig::default()
            }
        };

        Self::apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file; the format follows the file extension.
    pub async fn load_from_file(
        path: impl AsRef<Path>,
    ) -> Result<SwitchboardConfig, ConfigError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let config = Self::parse(&contents, &extension).map_err(|e| match e {
            ParseFailure::Unsupported => ConfigError::UnsupportedFormat(extension.clone()),
            ParseFailure::Invalid(message) => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
        })?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn apply_overrides<F>(config: &mut SwitchboardConfig, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            debug!("{} overrides api.base_url", ENV_API_BASE);
            config.api.base_url = base;
        }

        if let Some(raw) = lookup(ENV_API_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                field: ENV_API_TIMEOUT_SECS.to_string(),
                value: raw.clone(),
            })?;
            config.api.timeout_secs = Some(secs);
        }

        Ok(())
    }

    fn parse(contents: &str, extension: &str) -> Result<SwitchboardConfig, ParseFailure> {
        match extension {
            "json" => serde_json::from_str(contents).map_err(|e| ParseFailure::Invalid(e.to_string())),
            #[cfg(feature = "toml")]
            "toml" => toml::from_str(contents).map_err(|e| ParseFailure::Invalid(e.to_string())),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => {
                serde_yaml::from_str(contents).map_err(|e| ParseFailure::Invalid(e.to_string()))
            }
            _ => Err(ParseFailure::Unsupported),
        }
    }
}

enum ParseFailure {
    Unsupported,
    Invalid(String),
}
