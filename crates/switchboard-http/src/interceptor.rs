//! Request and response interceptors
//!
//! Request interceptors run in registration order and may rewrite the
//! outgoing request or refuse it. Response interceptors only observe: they
//! see every completed request and every failure, but cannot change or
//! suppress the outcome.

use switchboard_core::{ApiRequest, HttpMethod, TransportError};
use tracing::{debug, error};

/// Rewrites or rejects an outgoing request
pub trait RequestInterceptor: Send + Sync {
    /// Return the request to send, or an error to abort it.
    fn intercept(&self, request: ApiRequest) -> Result<ApiRequest, TransportError>;
}

/// Observes the outcome of a request
pub trait ResponseInterceptor: Send + Sync {
    /// Called after a 2xx response.
    fn on_response(&self, _method: HttpMethod, _url: &str, _status: u16) {}

    /// Called for every failure, including non-2xx statuses.
    fn on_error(&self, _method: HttpMethod, _url: &str, _error: &TransportError) {}
}

/// Pass-through request interceptor that traces each request
///
/// Authentication headers belong in an interceptor at this position.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestTracer;

impl RequestInterceptor for RequestTracer {
    fn intercept(&self, request: ApiRequest) -> Result<ApiRequest, TransportError> {
        debug!(method = %request.method, url = %request.url, "Sending request");
        Ok(request)
    }
}

/// Logs 401 responses
#[derive(Debug, Clone, Copy, Default)]
pub struct UnauthorizedLogger;

impl ResponseInterceptor for UnauthorizedLogger {
    fn on_error(&self, method: HttpMethod, url: &str, error: &TransportError) {
        if error.is_unauthorized() {
            error!(%method, url, "Unauthorized access");
        }
    }
}
