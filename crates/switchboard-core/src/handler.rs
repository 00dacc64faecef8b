//! Handlers and service modules.
//!
//! A handler implements one named operation. It receives the
//! [`ServiceContext`] it was bound to at registration time plus the caller's
//! [`Params`], and returns a [`WsResult`].
//!
//! Handlers are expected to report every *expected* failure (missing field,
//! transport error) as `WsResult::Error`. Returning `Err` is the escape hatch
//! for unexpected faults; the dispatcher turns it into an error result.
//!
//! # Example
//!
//! ```rust,ignore
//! use switchboard_core::handler::{handler_fn, ServiceContext};
//!
//! async fn ping(ctx: ServiceContext, _params: Params) -> anyhow::Result<WsResult> {
//!     let data = ctx.client.get("/ping", &RequestConfig::default()).await?;
//!     Ok(WsResult::ok(data))
//! }
//!
//! let handler = handler_fn(ping);
//! ```

use crate::client::SharedClient;
use crate::notify::NotificationBus;
use crate::params::Params;
use crate::result::WsResult;
use async_trait::async_trait;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

/// Shared, type-erased handler
pub type SharedHandler = Arc<dyn Handler>;

/// Everything a handler may touch besides its params
///
/// One instance is built at startup and cloned into every bound handler, so
/// all handlers share the same client and the same notification channel.
#[derive(Clone)]
pub struct ServiceContext {
    /// The shared HTTP client
    pub client: SharedClient,
    /// Channel for mutation notifications
    pub notifier: NotificationBus,
}

impl ServiceContext {
    /// Bundle a client and a notification bus.
    pub fn new(client: SharedClient, notifier: NotificationBus) -> Self {
        Self { client, notifier }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("subscribers", &self.notifier.subscriber_count())
            .finish_non_exhaustive()
    }
}

/// One named operation
#[async_trait]
pub trait Handler: Send + Sync {
    /// Run the operation.
    async fn call(&self, ctx: ServiceContext, params: Params) -> anyhow::Result<WsResult>;
}

/// Adapter turning an async function into a [`Handler`]
pub struct FnHandler<F, Fut>
where
    F: Fn(ServiceContext, Params) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<WsResult>> + Send + 'static,
{
    handler: F,
    _phantom: PhantomData<fn() -> Fut>,
}

impl<F, Fut> FnHandler<F, Fut>
where
    F: Fn(ServiceContext, Params) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<WsResult>> + Send + 'static,
{
    /// Wrap a function.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }
}

#[async_trait]
impl<F, Fut> Handler for FnHandler<F, Fut>
where
    F: Fn(ServiceContext, Params) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<WsResult>> + Send + 'static,
{
    async fn call(&self, ctx: ServiceContext, params: Params) -> anyhow::Result<WsResult> {
        (self.handler)(ctx, params).await
    }
}

/// Wrap an async function as a shared handler.
pub fn handler_fn<F, Fut>(handler: F) -> SharedHandler
where
    F: Fn(ServiceContext, Params) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<WsResult>> + Send + 'static,
{
    Arc::new(FnHandler::new(handler))
}

/// A family of operations exported together, one per resource
pub trait ServiceModule: Send + Sync {
    /// Module path, used only in diagnostics.
    fn path(&self) -> &str;

    /// Every `(operation name, handler)` pair this module exports.
    fn exports(&self) -> Vec<(&'static str, SharedHandler)>;
}
