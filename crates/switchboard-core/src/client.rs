//! Client abstraction shared by every handler.
//!
//! Core only defines the contract; `switchboard-http` implements it with
//! reqwest and tests substitute a recording mock. Each verb returns the
//! response payload directly and propagates every failure as a
//! [`TransportError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use switchboard_core::client::{ApiClient, RequestConfig};
//!
//! let product = client.get("/products/42", &RequestConfig::default()).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// The shared client instance handlers are bound to
pub type SharedClient = Arc<dyn ApiClient>;

/// HTTP verbs the adapter exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Get the method as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call overrides
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestConfig {
    /// Extra headers; these win over the client's defaults
    pub headers: BTreeMap<String, String>,
    /// Timeout for this call only
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Add a header (builder pattern).
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the timeout (builder pattern).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// One outgoing request, as seen by interceptors and transports
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the base URL, or an absolute URL
    pub url: String,
    /// JSON body (POST, PUT)
    pub body: Option<Value>,
    /// Per-call overrides
    pub config: RequestConfig,
}

impl ApiRequest {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            config: RequestConfig::default(),
        }
    }

    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Create a POST request.
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, url).body(body)
    }

    /// Create a PUT request.
    pub fn put(url: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Put, url).body(body)
    }

    /// Create a DELETE request.
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    /// Set the request body (builder pattern).
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Replace the per-call config (builder pattern).
    pub fn with_config(mut self, config: RequestConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a header (builder pattern).
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Set the timeout (builder pattern).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }
}

/// Transport or HTTP-status failure
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The server answered with a non-2xx status
    #[error("Request failed with status code {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Decoded response body, if any
        body: Option<Value>,
    },

    /// The request could not be sent or the connection failed
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request timed out
    #[error("Request timed out")]
    Timeout,

    /// The response body could not be read
    #[error("Failed to read response body: {0}")]
    Decode(String),

    /// The URL could not be resolved
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of the error response body, when there is one.
    pub fn detail_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                body: Some(body), ..
            } => body
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty()),
            _ => None,
        }
    }

    /// `true` for 401 responses.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Uniform `(url, body?, config?) -> data` contract over an HTTP transport
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Send one request and return the response payload.
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError>;

    /// GET `url`.
    async fn get(&self, url: &str, config: &RequestConfig) -> Result<Value, TransportError> {
        self.send(ApiRequest::get(url).with_config(config.clone()))
            .await
    }

    /// POST `body` to `url`.
    async fn post(
        &self,
        url: &str,
        body: Value,
        config: &RequestConfig,
    ) -> Result<Value, TransportError> {
        self.send(ApiRequest::post(url, body).with_config(config.clone()))
            .await
    }

    /// PUT `body` to `url`.
    async fn put(
        &self,
        url: &str,
        body: Value,
        config: &RequestConfig,
    ) -> Result<Value, TransportError> {
        self.send(ApiRequest::put(url, body).with_config(config.clone()))
            .await
    }

    /// DELETE `url`.
    async fn delete(&self, url: &str, config: &RequestConfig) -> Result<Value, TransportError> {
        self.send(ApiRequest::delete(url).with_config(config.clone()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builder() {
        let req = ApiRequest::post("/products", json!({"sku": "A1"}))
            .header("X-Trace", "abc")
            .timeout(Duration::from_secs(5));

        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "/products");
        assert_eq!(req.body, Some(json!({"sku": "A1"})));
        assert_eq!(req.config.headers.get("X-Trace"), Some(&"abc".to_string()));
        assert_eq!(req.config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_detail_message() {
        let err = TransportError::Status {
            status: 409,
            body: Some(json!({"message": "Duplicate SKU"})),
        };
        assert_eq!(err.detail_message(), Some("Duplicate SKU"));
        assert_eq!(err.status(), Some(409));

        let no_message = TransportError::Status {
            status: 500,
            body: Some(json!("Internal Server Error")),
        };
        assert_eq!(no_message.detail_message(), None);

        let empty = TransportError::Status {
            status: 400,
            body: Some(json!({"message": ""})),
        };
        assert_eq!(empty.detail_message(), None);

        assert_eq!(TransportError::Timeout.detail_message(), None);
    }

    #[test]
    fn test_error_display() {
        let err = TransportError::Request("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
        assert!(TransportError::Timeout.to_string().contains("timed out"));

        let unauthorized = TransportError::Status { status: 401, body: None };
        assert!(unauthorized.is_unauthorized());
        assert!(unauthorized.to_string().contains("401"));
    }
}
