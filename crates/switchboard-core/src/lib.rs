//! # switchboard-core
//!
//! The indirection layer between callers and the backend: a registry of
//! named operations, each a thin async wrapper around HTTP calls, and a
//! single [`Dispatcher::fire`] entry point with a uniform [`WsResult`]
//! contract.
//!
//! # Architecture
//!
//! ```text
//! caller ── fire("ws-products-get", params) ──▶ Dispatcher
//!                                                  │ lookup
//!                                                  ▼
//!                                           EventRegistry
//!                                                  │ bound handler
//!                                                  ▼
//!                                   Handler(ServiceContext, Params)
//!                                        │                 │
//!                                        ▼                 ▼
//!                                    ApiClient      NotificationBus
//! ```
//!
//! Core defines the client abstraction ([`ApiClient`]); the reqwest
//! implementation lives in `switchboard-http` and the concrete service
//! modules in `switchboard-webservice`.

pub mod client;
pub mod dispatch;
pub mod handler;
pub mod notify;
pub mod params;
pub mod registry;
pub mod result;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

pub use client::{
    ApiClient, ApiRequest, HttpMethod, RequestConfig, SharedClient, TransportError,
};
pub use dispatch::{DispatchError, Dispatcher, FALLBACK_ERROR};
pub use handler::{handler_fn, FnHandler, Handler, ServiceContext, ServiceModule, SharedHandler};
pub use notify::{Notification, NotificationBus, NotificationDetail};
pub use params::Params;
pub use registry::{BoundHandler, EventRegistry, EventRegistryBuilder, Registry};
pub use result::WsResult;
