//! The single entry point for running operations.
//!
//! [`Dispatcher::fire`] always resolves to a [`WsResult`]. Failures are
//! flattened in two layers:
//!
//! - handlers convert expected failures (validation, transport) into
//!   `WsResult::Error` themselves;
//! - the dispatcher converts everything else (unknown name, a handler
//!   returning `Err`, a handler panicking) into `WsResult::Error`.
//!
//! Callers therefore only ever branch on `result.is_success()`.

use crate::params::Params;
use crate::registry::{EventRegistry, Registry};
use crate::result::WsResult;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// Fallback message when a failure carries no text
pub const FALLBACK_ERROR: &str = "An error occurred";

/// Dispatcher-level failures, converted to `WsResult::Error` before returning
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No handler registered under the name
    #[error("Event \"{0}\" not found")]
    NotFound(String),

    /// The handler returned `Err` instead of a result
    #[error("{message}")]
    HandlerFailed {
        /// Operation name
        event: String,
        /// Flattened error text
        message: String,
    },

    /// The handler panicked
    #[error("{message}")]
    HandlerPanicked {
        /// Operation name
        event: String,
        /// Panic payload text
        message: String,
    },
}

impl From<DispatchError> for WsResult {
    fn from(err: DispatchError) -> Self {
        WsResult::error(err.to_string())
    }
}

/// Resolves operation names to handlers and normalizes every outcome
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<EventRegistry>,
}

impl Dispatcher {
    /// Dispatch against a frozen registry.
    pub fn new(registry: Arc<EventRegistry>) -> Self {
        Self { registry }
    }

    /// The registry being dispatched against.
    pub fn registry(&self) -> &EventRegistry {
        &self.registry
    }

    /// Run the operation registered as `name`.
    ///
    /// Never panics and never fails: every outcome is a `WsResult`.
    pub async fn fire(&self, name: impl AsRef<str>, params: Params) -> WsResult {
        let name = name.as_ref();

        let Some(bound) = self.registry.get(name) else {
            error!("Event \"{}\" is not registered", name);
            return DispatchError::NotFound(name.to_string()).into();
        };

        debug!(event = %name, "Firing event");
        let outcome = AssertUnwindSafe(bound.invoke(params)).catch_unwind().await;

        match outcome {
            Ok(Ok(result)) => {
                debug!(event = %name, success = result.is_success(), "Event completed");
                result
            }
            Ok(Err(err)) => {
                error!("Error firing event \"{}\": {:#}", name, err);
                DispatchError::HandlerFailed {
                    event: name.to_string(),
                    message: non_empty(err.to_string()),
                }
                .into()
            }
            Err(panic) => {
                let message = non_empty(panic_message(panic.as_ref()));
                error!("Handler for event \"{}\" panicked: {}", name, message);
                DispatchError::HandlerPanicked {
                    event: name.to_string(),
                    message,
                }
                .into()
            }
        }
    }
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        message
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::new()
    }
}
