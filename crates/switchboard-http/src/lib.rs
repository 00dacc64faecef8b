//! # switchboard-http
//!
//! The HTTP boundary. [`HttpApiClient`] implements
//! [`switchboard_core::ApiClient`] on top of `reqwest`: it resolves request
//! paths against the configured base URL, applies default headers, runs the
//! interceptor chains and turns every non-2xx answer into a
//! [`TransportError::Status`](switchboard_core::TransportError::Status).

#![warn(missing_docs)]

mod client;
mod interceptor;

pub use client::{HttpApiClient, HttpApiClientBuilder};
pub use interceptor::{RequestInterceptor, RequestTracer, ResponseInterceptor, UnauthorizedLogger};
