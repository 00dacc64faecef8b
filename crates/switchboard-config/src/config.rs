//! Configuration types
//!
//! Every section carries `#[serde(default)]`, so a partial file only
//! overrides the keys it names.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Default backend base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:1234/api";

/// Default capacity of the notification channel
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 64;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchboardConfig {
    /// HTTP boundary settings
    pub api: ApiConfig,
    /// Mutation notification settings
    pub notifications: NotificationConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl SwitchboardConfig {
    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;

        if self.notifications.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "notifications.capacity".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(())
    }
}

/// HTTP boundary configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL prepended to every relative request path
    pub base_url: String,
    /// Headers sent with every request
    pub headers: BTreeMap<String, String>,
    /// Request timeout in seconds; `None` means no timeout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            headers,
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// Configured timeout as a [`Duration`]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if base.is_empty() || !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                value: self.base_url.clone(),
            });
        }
        Ok(())
    }
}

/// Notification channel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Number of notifications buffered per subscriber before the oldest are dropped
    pub capacity: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_NOTIFICATION_CAPACITY,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level (off, error, warn, info, debug, trace)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
