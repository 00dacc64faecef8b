//! reqwest implementation of [`ApiClient`]

use crate::interceptor::{RequestInterceptor, RequestTracer, ResponseInterceptor, UnauthorizedLogger};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use switchboard_config::ApiConfig;
use switchboard_core::{ApiClient, ApiRequest, HttpMethod, TransportError};
use tracing::{debug, error};
use url::Url;

/// Shared HTTP client configured once at startup
///
/// Cloning is cheap; clones share the connection pool and interceptors.
#[derive(Clone)]
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
    default_headers: BTreeMap<String, String>,
    timeout: Option<Duration>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl HttpApiClient {
    /// Client with the default interceptor chains.
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        Self::builder(config).build()
    }

    /// Start configuring a client.
    pub fn builder(config: &ApiConfig) -> HttpApiClientBuilder {
        HttpApiClientBuilder::new(config)
    }

    /// Base URL relative paths are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a request path to the URL actually requested.
    ///
    /// Absolute `http(s)://` URLs are used as-is; anything else is appended
    /// to the base URL with exactly one `/` between them.
    pub fn resolve_url(&self, url: &str) -> Result<Url, TransportError> {
        let joined = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            let base = self.base_url.trim_end_matches('/');
            let path = url.trim_start_matches('/');
            if path.is_empty() {
                base.to_string()
            } else {
                format!("{}/{}", base, path)
            }
        };

        Url::parse(&joined).map_err(|e| TransportError::InvalidUrl(format!("{}: {}", joined, e)))
    }

    fn headers_for(&self, request: &ApiRequest) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        // Per-request headers are inserted last so they replace defaults
        for (key, value) in self.default_headers.iter().chain(request.config.headers.iter()) {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| TransportError::Request(format!("invalid header name {}: {}", key, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TransportError::Request(format!("invalid value for header {}: {}", key, e)))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    async fn execute(&self, request: &ApiRequest) -> Result<(u16, Value), TransportError> {
        let url = self.resolve_url(&request.url)?;

        let mut builder = self
            .client
            .request(reqwest_method(request.method), url)
            .headers(self.headers_for(request)?);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.config.timeout.or(self.timeout) {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Decode(e.to_string())
            }
        })?;
        let body = decode_body(&text);

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: (!body.is_null()).then_some(body),
            });
        }

        Ok((status.as_u16(), body))
    }

    fn report_failure(&self, method: HttpMethod, url: &str, err: &TransportError) {
        for interceptor in &self.response_interceptors {
            interceptor.on_error(method, url, err);
        }
        error!(url, error = %err, "{} request failed", method);
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let method = request.method;
        let original_url = request.url.clone();

        let mut request = request;
        for interceptor in &self.request_interceptors {
            request = match interceptor.intercept(request) {
                Ok(request) => request,
                Err(err) => {
                    self.report_failure(method, &original_url, &err);
                    return Err(err);
                }
            };
        }

        match self.execute(&request).await {
            Ok((status, data)) => {
                debug!(%method, url = %request.url, status, "Request completed");
                for interceptor in &self.response_interceptors {
                    interceptor.on_response(request.method, &request.url, status);
                }
                Ok(data)
            }
            Err(err) => {
                self.report_failure(request.method, &request.url, &err);
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for HttpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApiClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .field("timeout", &self.timeout)
            .field("request_interceptors", &self.request_interceptors.len())
            .field("response_interceptors", &self.response_interceptors.len())
            .finish()
    }
}

/// Builder for [`HttpApiClient`]
///
/// Starts with [`RequestTracer`] and [`UnauthorizedLogger`] installed;
/// further interceptors run after them.
pub struct HttpApiClientBuilder {
    config: ApiConfig,
    client: Option<reqwest::Client>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl HttpApiClientBuilder {
    fn new(config: &ApiConfig) -> Self {
        Self {
            config: config.clone(),
            client: None,
            request_interceptors: vec![Arc::new(RequestTracer)],
            response_interceptors: vec![Arc::new(UnauthorizedLogger)],
        }
    }

    /// Append a request interceptor.
    pub fn request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptors.push(Arc::new(interceptor));
        self
    }

    /// Append a response interceptor.
    pub fn response_interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.response_interceptors.push(Arc::new(interceptor));
        self
    }

    /// Drop the default interceptors.
    pub fn without_default_interceptors(mut self) -> Self {
        self.request_interceptors.clear();
        self.response_interceptors.clear();
        self
    }

    /// Use an existing reqwest client (shared pool, proxies, TLS settings).
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Finish configuration.
    pub fn build(self) -> Result<HttpApiClient, TransportError> {
        let client = match self.client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .build()
                .map_err(|e| TransportError::Request(format!("failed to build HTTP client: {}", e)))?,
        };

        Ok(HttpApiClient {
            client,
            base_url: self.config.base_url.clone(),
            timeout: self.config.timeout(),
            default_headers: self.config.headers,
            request_interceptors: self.request_interceptors,
            response_interceptors: self.response_interceptors,
        })
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Request(err.to_string())
    }
}

/// Empty body is `null`, JSON is parsed, anything else is kept as text.
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
