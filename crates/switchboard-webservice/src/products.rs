//! Product operations
//!
//! Every handler validates its required fields first and returns without
//! touching the client when one is missing. Transport failures become error
//! results carrying the server's `message` when the error body has one, or a
//! fixed per-operation fallback otherwise. Successful mutations publish one
//! notification each.

use crate::operation::Operation;
use serde_json::Value;
use switchboard_core::params::render_value;
use switchboard_core::{
    handler_fn, ApiClient, Notification, Params, RequestConfig, ServiceContext, ServiceModule,
    SharedHandler, TransportError, WsResult,
};
use tracing::debug;

/// Module path reported in diagnostics
pub const MODULE_PATH: &str = "webservice/ws.products";

/// Resource name used in notification events
pub const RESOURCE: &str = "product";

const ID_REQUIRED: &str = "Product ID is required";
const DATA_REQUIRED: &str = "Product data is required";
const CATEGORY_REQUIRED: &str = "Category is required";
const DELETED: &str = "Product deleted successfully";

/// The `ws-products-*` operations
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductsModule;

impl ServiceModule for ProductsModule {
    fn path(&self) -> &str {
        MODULE_PATH
    }

    fn exports(&self) -> Vec<(&'static str, SharedHandler)> {
        vec![
            (Operation::Search.as_str(), handler_fn(search)),
            (Operation::Get.as_str(), handler_fn(get)),
            (Operation::Create.as_str(), handler_fn(create)),
            (Operation::Update.as_str(), handler_fn(update)),
            (Operation::Delete.as_str(), handler_fn(delete)),
            (Operation::ByCategory.as_str(), handler_fn(by_category)),
        ]
    }
}

/// `GET /products`, filtered by the `params` object when it has entries.
async fn search(ctx: ServiceContext, params: Params) -> anyhow::Result<WsResult> {
    let query = params.nested("params").query_string();
    let url = if query.is_empty() {
        "/products".to_string()
    } else {
        format!("/products?{}", query)
    };

    Ok(match ctx.client.get(&url, &RequestConfig::default()).await {
        Ok(data) => WsResult::ok(data),
        Err(err) => failure(Operation::Search, &err),
    })
}

async fn get(ctx: ServiceContext, params: Params) -> anyhow::Result<WsResult> {
    let Some(id) = params.require("id") else {
        return Ok(WsResult::error(ID_REQUIRED));
    };

    Ok(
        match ctx.client.get(&product_url(id), &RequestConfig::default()).await {
            Ok(data) => WsResult::ok(data),
            Err(err) => failure(Operation::Get, &err),
        },
    )
}

async fn create(ctx: ServiceContext, params: Params) -> anyhow::Result<WsResult> {
    let Some(data) = params.require("data") else {
        return Ok(WsResult::error(DATA_REQUIRED));
    };

    Ok(
        match ctx
            .client
            .post("/products", data.clone(), &RequestConfig::default())
            .await
        {
            Ok(created) => {
                ctx.notifier
                    .publish(Notification::created(RESOURCE, created.clone()));
                WsResult::ok(created)
            }
            Err(err) => failure(Operation::Create, &err),
        },
    )
}

async fn update(ctx: ServiceContext, params: Params) -> anyhow::Result<WsResult> {
    let Some(id) = params.require("id") else {
        return Ok(WsResult::error(ID_REQUIRED));
    };
    let Some(data) = params.require("data") else {
        return Ok(WsResult::error(DATA_REQUIRED));
    };

    Ok(
        match ctx
            .client
            .put(&product_url(id), data.clone(), &RequestConfig::default())
            .await
        {
            Ok(updated) => {
                ctx.notifier
                    .publish(Notification::updated(RESOURCE, updated.clone()));
                WsResult::ok(updated)
            }
            Err(err) => failure(Operation::Update, &err),
        },
    )
}

async fn delete(ctx: ServiceContext, params: Params) -> anyhow::Result<WsResult> {
    let Some(id) = params.require("id") else {
        return Ok(WsResult::error(ID_REQUIRED));
    };

    Ok(
        match ctx
            .client
            .delete(&product_url(id), &RequestConfig::default())
            .await
        {
            Ok(_) => {
                ctx.notifier
                    .publish(Notification::deleted(RESOURCE, id.clone()));
                WsResult::message(DELETED)
            }
            Err(err) => failure(Operation::Delete, &err),
        },
    )
}

/// `GET /products?category=..`, followed by `additionalParams` in their own order.
async fn by_category(ctx: ServiceContext, params: Params) -> anyhow::Result<WsResult> {
    let Some(category) = params.require("category") else {
        return Ok(WsResult::error(CATEGORY_REQUIRED));
    };

    let mut query = Params::new().with("category", category.clone());
    query.extend(params.nested("additionalParams"));
    let url = format!("/products?{}", query.query_string());

    Ok(match ctx.client.get(&url, &RequestConfig::default()).await {
        Ok(data) => WsResult::ok(data),
        Err(err) => failure(Operation::ByCategory, &err),
    })
}

fn product_url(id: &Value) -> String {
    format!("/products/{}", render_value(id))
}

fn failure(operation: Operation, err: &TransportError) -> WsResult {
    debug!(operation = %operation, error = %err, "Product request failed");
    WsResult::error(
        err.detail_message()
            .unwrap_or_else(|| fallback_message(operation)),
    )
}

fn fallback_message(operation: Operation) -> &'static str {
    match operation {
        Operation::Search => "Failed to search products",
        Operation::Get => "Failed to get product",
        Operation::Create => "Failed to create product",
        Operation::Update => "Failed to update product",
        Operation::Delete => "Failed to delete product",
        Operation::ByCategory => "Failed to get products by category",
    }
}
