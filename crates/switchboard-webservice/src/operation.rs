//! Typed operation names and requests
//!
//! [`Operation`] closes the set of product operation names so callers can't
//! misspell one; it converts to the same string key the registry uses.
//! [`ProductRequest`] carries the arguments of each operation as typed fields
//! and lowers them to [`Params`].

use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use switchboard_core::{Dispatcher, Params, WsResult};
use thiserror::Error;

/// Product operation names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `ws-products-search`
    Search,
    /// `ws-products-get`
    Get,
    /// `ws-products-create`
    Create,
    /// `ws-products-update`
    Update,
    /// `ws-products-delete`
    Delete,
    /// `ws-products-by-category`
    ByCategory,
}

impl Operation {
    /// Every operation, in export order.
    pub const ALL: [Operation; 6] = [
        Operation::Search,
        Operation::Get,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
        Operation::ByCategory,
    ];

    /// Registry key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "ws-products-search",
            Self::Get => "ws-products-get",
            Self::Create => "ws-products-create",
            Self::Update => "ws-products-update",
            Self::Delete => "ws-products-delete",
            Self::ByCategory => "ws-products-by-category",
        }
    }

    /// `true` for operations that publish a notification on success.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Create | Self::Update | Self::Delete)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Operation {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Name that matches no [`Operation`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// Arguments for one product operation
#[derive(Debug, Clone, PartialEq)]
pub enum ProductRequest {
    /// Filtered listing
    Search { filters: Params },
    /// One product
    Get { id: Value },
    /// New product
    Create { data: Value },
    /// Replace a product
    Update { id: Value, data: Value },
    /// Remove a product
    Delete { id: Value },
    /// Listing restricted to a category, with extra query parameters
    ByCategory { category: String, additional: Params },
}

impl ProductRequest {
    /// The operation this request targets.
    pub fn operation(&self) -> Operation {
        match self {
            Self::Search { .. } => Operation::Search,
            Self::Get { .. } => Operation::Get,
            Self::Create { .. } => Operation::Create,
            Self::Update { .. } => Operation::Update,
            Self::Delete { .. } => Operation::Delete,
            Self::ByCategory { .. } => Operation::ByCategory,
        }
    }

    /// Lower to the params shape the handlers read.
    pub fn into_params(self) -> Params {
        match self {
            Self::Search { filters } => Params::new().with("params", filters),
            Self::Get { id } | Self::Delete { id } => Params::new().with("id", id),
            Self::Create { data } => Params::new().with("data", data),
            Self::Update { id, data } => Params::new().with("id", id).with("data", data),
            Self::ByCategory {
                category,
                additional,
            } => Params::new()
                .with("category", category)
                .with("additionalParams", additional),
        }
    }
}

/// Typed front for the product operations
#[derive(Debug, Clone)]
pub struct ProductsApi {
    dispatcher: Dispatcher,
}

impl ProductsApi {
    /// Wrap a dispatcher.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Dispatch one request.
    pub async fn send(&self, request: ProductRequest) -> WsResult {
        let operation = request.operation();
        self.dispatcher
            .fire(operation, request.into_params())
            .await
    }
}
