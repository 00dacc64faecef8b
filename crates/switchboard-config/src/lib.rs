//! # Switchboard Configuration Library
//!
//! Type-safe configuration for the switchboard workspace: the HTTP boundary
//! (base URL, default headers, timeout), the notification channel and logging.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use switchboard_config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::load(Some("switchboard.toml".as_ref())).await?;
//!     println!("{}", config.api.base_url);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod loader;

pub use config::*;
pub use error::ConfigError;
pub use loader::*;
