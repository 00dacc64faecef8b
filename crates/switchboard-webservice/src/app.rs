//! Composition root
//!
//! Builds the one shared client and notification bus, registers every
//! service module against them, and hands out the resulting dispatcher.
//! Registration finishes before [`Switchboard`] is returned, so no caller
//! can observe a partially populated registry.

use crate::operation::ProductsApi;
use crate::products::ProductsModule;
use std::sync::Arc;
use switchboard_config::SwitchboardConfig;
use switchboard_core::{
    Dispatcher, EventRegistry, EventRegistryBuilder, NotificationBus, Params, ServiceContext,
    ServiceModule, SharedClient, WsResult,
};
use switchboard_http::HttpApiClient;
use tracing::info;

/// Every service module, in registration order.
///
/// A later module exporting an existing name replaces the earlier handler.
pub fn modules() -> Vec<Box<dyn ServiceModule>> {
    vec![Box::new(ProductsModule)]
}

/// A fully wired application context
#[derive(Debug, Clone)]
pub struct Switchboard {
    dispatcher: Dispatcher,
    notifier: NotificationBus,
}

impl Switchboard {
    /// Build the HTTP client from `config` and register every module.
    pub fn bootstrap(config: &SwitchboardConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let client = HttpApiClient::new(&config.api)?;
        info!(base_url = %client.base_url(), "HTTP client ready");
        Ok(Self::with_client(
            Arc::new(client),
            config.notifications.capacity,
        ))
    }

    /// Register every module against an already built client.
    pub fn with_client(client: SharedClient, notification_capacity: usize) -> Self {
        let notifier = NotificationBus::new(notification_capacity);
        let ctx = ServiceContext::new(client, notifier.clone());

        let modules = modules();
        let registry = EventRegistryBuilder::new(ctx)
            .register_all(modules.iter().map(|module| module.as_ref()))
            .build();
        info!(
            modules = modules.len(),
            operations = registry.names().len(),
            "Service modules registered"
        );

        Self {
            dispatcher: Dispatcher::new(Arc::new(registry)),
            notifier,
        }
    }

    /// Run the operation registered as `name`.
    pub async fn fire(&self, name: impl AsRef<str>, params: Params) -> WsResult {
        self.dispatcher.fire(name, params).await
    }

    /// Dispatcher shared by every caller.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Frozen registry of every registered operation.
    pub fn registry(&self) -> &EventRegistry {
        self.dispatcher.registry()
    }

    /// Bus the mutation notifications are published on.
    pub fn notifier(&self) -> &NotificationBus {
        &self.notifier
    }

    /// Typed front for the product operations.
    pub fn products(&self) -> ProductsApi {
        ProductsApi::new(self.dispatcher.clone())
    }
}
