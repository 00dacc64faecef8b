//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid for its format
    #[error("Failed to parse config file {path}: {message}")]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// The file extension names a format this build cannot read
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A value parsed but is unusable
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// Dotted path of the offending field
        field: String,
        /// Offending value
        value: String,
    },
}
