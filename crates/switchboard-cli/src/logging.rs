//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout carries only command output. The subscriber
//! is installed before the configuration file is read, at a level taken from
//! the flags alone, and narrowed or widened once the configured level is
//! known.

use crate::cli::LogLevel;
use anyhow::{anyhow, Result};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Level used while the configuration is still loading and no flag is given.
pub const STARTUP_LEVEL: &str = "warn";

/// `--log-level` wins, then `--verbose`, then the configured level.
pub fn resolve_level(flag: Option<LogLevel>, verbose: bool, configured: &str) -> LevelFilter {
    match flag {
        Some(level) => level.into(),
        None if verbose => LevelFilter::DEBUG,
        None => LevelFilter::from_str(configured).unwrap_or(LevelFilter::INFO),
    }
}

/// Level to log at before the configuration file has been read.
pub fn startup_level(flag: Option<LogLevel>, verbose: bool) -> LevelFilter {
    resolve_level(flag, verbose, STARTUP_LEVEL)
}

/// `RUST_LOG` directives on top of `level`.
fn build_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

/// Handle for changing the level of the installed subscriber
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// Swap the active filter for one at `level`.
    pub fn set_level(&self, level: LevelFilter) -> Result<()> {
        self.filter
            .reload(build_filter(level))
            .map_err(|e| anyhow!("Failed to update log level: {}", e))
    }
}

/// Install the global subscriber. `RUST_LOG` directives still apply on top.
pub fn init(level: LevelFilter) -> Result<LogHandle> {
    let (filter, handle) = reload::Layer::new(build_filter(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(LogHandle { filter: handle })
}
