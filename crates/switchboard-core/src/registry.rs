//! Event registry: operation name to bound handler.
//!
//! Registries are built once and then read-only. Use
//! [`EventRegistryBuilder`] during startup, then call `.build()` to get an
//! immutable [`EventRegistry`]. Handlers are bound to the builder's
//! [`ServiceContext`] at the moment they are registered.
//!
//! Registering a name twice replaces the earlier handler (last registration
//! wins). The overwrite is logged at warn level because it usually means two
//! modules export the same operation name.

use crate::handler::{Handler, ServiceContext, ServiceModule, SharedHandler};
use crate::params::Params;
use crate::result::WsResult;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Name-to-handler lookup consulted by the dispatcher
///
/// [`EventRegistry`] is the only implementation; all population goes
/// through [`EventRegistryBuilder`], so lookups never contend with writes.
pub trait Registry {
    /// Operation name
    type Key;

    /// What a name resolves to
    type Value;

    /// Resolve an operation name.
    fn get<Q>(&self, key: &Q) -> Option<&Self::Value>
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Eq + std::hash::Hash;

    /// `true` when `key` has a registration.
    fn contains<Q>(&self, key: &Q) -> bool
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Eq + std::hash::Hash,
    {
        self.get(key).is_some()
    }

    /// Every registration, in no particular order.
    fn iter(&self) -> impl Iterator<Item = (&Self::Key, &Self::Value)>;

    /// Number of registered operations.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A handler together with the context it was bound to
#[derive(Clone)]
pub struct BoundHandler {
    module: Option<String>,
    handler: SharedHandler,
    ctx: ServiceContext,
}

impl BoundHandler {
    /// Module that exported this handler, if registered through one.
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Run the handler with the bound context.
    pub fn invoke(&self, params: Params) -> BoxFuture<'static, anyhow::Result<WsResult>> {
        let handler = Arc::clone(&self.handler);
        let ctx = self.ctx.clone();
        async move { handler.call(ctx, params).await }.boxed()
    }
}

impl std::fmt::Debug for BoundHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundHandler")
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

/// Accumulates registrations during startup
pub struct EventRegistryBuilder {
    ctx: ServiceContext,
    entries: HashMap<String, BoundHandler>,
}

impl EventRegistryBuilder {
    /// Start a registry whose handlers will all be bound to `ctx`.
    pub fn new(ctx: ServiceContext) -> Self {
        Self {
            ctx,
            entries: HashMap::new(),
        }
    }

    /// Register a handler under `name`, replacing any earlier registration.
    pub fn register(self, name: impl Into<String>, handler: SharedHandler) -> Self {
        self.insert(name.into(), None, handler)
    }

    /// Register every export of one module.
    pub fn register_module(mut self, module: &dyn ServiceModule) -> Self {
        let exports = module.exports();
        debug!(
            module = module.path(),
            operations = exports.len(),
            "Registering service module"
        );
        for (name, handler) in exports {
            self = self.insert(name.to_string(), Some(module.path().to_string()), handler);
        }
        self
    }

    /// Register every export of every module, in iteration order.
    pub fn register_all<'a, I>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = &'a dyn ServiceModule>,
    {
        for module in modules {
            self = self.register_module(module);
        }
        self
    }

    /// Freeze the registry.
    pub fn build(self) -> EventRegistry {
        info!("Event registry built with {} operations", self.entries.len());
        EventRegistry {
            entries: self.entries,
        }
    }

    fn insert(mut self, name: String, module: Option<String>, handler: SharedHandler) -> Self {
        let bound = BoundHandler {
            module,
            handler,
            ctx: self.ctx.clone(),
        };

        if let Some(previous) = self.entries.insert(name.clone(), bound) {
            warn!(
                event = %name,
                previous_module = previous.module().unwrap_or("<direct>"),
                "Operation registered twice, the later registration replaces the earlier one"
            );
        } else {
            debug!(event = %name, "Registered operation");
        }
        self
    }
}

/// Immutable mapping from operation name to bound handler
#[derive(Debug, Default)]
pub struct EventRegistry {
    entries: HashMap<String, BoundHandler>,
}

impl EventRegistry {
    /// Registered operation names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Registry for EventRegistry {
    type Key = String;
    type Value = BoundHandler;

    fn get<Q>(&self, key: &Q) -> Option<&BoundHandler>
    where
        String: Borrow<Q>,
        Q: ?Sized + Eq + std::hash::Hash,
    {
        self.entries.get(key)
    }

    fn iter(&self) -> impl Iterator<Item = (&String, &BoundHandler)> {
        self.entries.iter()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
