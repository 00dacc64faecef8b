//! Mock client for testing
//!
//! [`MockClient`] implements [`ApiClient`] entirely in memory. It is:
//!
//! - **Scripted**: responses are configured per `(method, url)` pair
//! - **Observable**: every request is recorded for assertions
//! - **Strict**: an unscripted request fails with `TransportError::Request`
//!
//! # Example
//!
//! ```rust,ignore
//! use switchboard_core::client::{ApiClient, HttpMethod, RequestConfig};
//! use switchboard_core::test_support::MockClient;
//! use serde_json::json;
//!
//! let client = MockClient::new();
//! client.respond(HttpMethod::Get, "/products/42", json!({"id": 42}));
//!
//! let data = client.get("/products/42", &RequestConfig::default()).await?;
//! assert_eq!(data, json!({"id": 42}));
//! assert_eq!(client.calls().len(), 1);
//! ```

use crate::client::{ApiClient, ApiRequest, HttpMethod, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// One request observed by [`MockClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// HTTP method
    pub method: HttpMethod,
    /// URL exactly as the handler passed it
    pub url: String,
    /// Request body
    pub body: Option<Value>,
}

/// In-memory [`ApiClient`] with scripted responses
#[derive(Debug, Default)]
pub struct MockClient {
    responses: Mutex<HashMap<(HttpMethod, String), Result<Value, TransportError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockClient {
    /// Create a mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful payload for `method url`.
    pub fn respond(&self, method: HttpMethod, url: impl Into<String>, data: Value) {
        self.script(method, url, Ok(data));
    }

    /// Script a failure for `method url`.
    pub fn fail(&self, method: HttpMethod, url: impl Into<String>, error: TransportError) {
        self.script(method, url, Err(error));
    }

    /// Every request received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Requests received with `method`.
    pub fn calls_with(&self, method: HttpMethod) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .collect()
    }

    fn script(&self, method: HttpMethod, url: impl Into<String>, response: Result<Value, TransportError>) {
        self.responses
            .lock()
            .unwrap()
            .insert((method, url.into()), response);
    }
}

#[async_trait]
impl ApiClient for MockClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: request.method,
            url: request.url.clone(),
            body: request.body.clone(),
        });

        self.responses
            .lock()
            .unwrap()
            .get(&(request.method, request.url.clone()))
            .cloned()
            .unwrap_or_else(|| {
                Err(TransportError::Request(format!(
                    "no response scripted for {} {}",
                    request.method, request.url
                )))
            })
    }
}
