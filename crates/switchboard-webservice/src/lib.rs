//! # switchboard-webservice
//!
//! Concrete service modules and the composition root that wires them to a
//! shared HTTP client.
//!
//! ```rust,ignore
//! use switchboard_webservice::{Operation, Switchboard};
//!
//! let board = Switchboard::bootstrap(&config)?;
//! let result = board
//!     .fire(Operation::Get, Params::new().with("id", 42))
//!     .await;
//! if result.is_success() {
//!     println!("{}", result);
//! }
//! ```

pub mod app;
pub mod operation;
pub mod products;

pub use app::{modules, Switchboard};
pub use operation::{Operation, ProductRequest, ProductsApi, UnknownOperation};
pub use products::ProductsModule;
