//! HTTP Client port

use std::future::Future;
use std::pin::Pin;

use restkit_domain::{ApiRequest, ApiResponse, RequestConfig, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Boxed future returned by every transport call.
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ApiResponse, HttpClientError>> + Send + 'a>>;

/// Errors reported by an HTTP transport.
///
/// Resources never interpret these; they reach the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The URL could not be parsed or resolved.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that elapsed
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("could not resolve host `{host}`: {message}")]
    DnsError {
        /// The unresolved host
        host: String,
        /// Transport message
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host
        host: String,
        /// Target port
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// The redirect limit
        max: usize,
    },

    /// The server answered with a non-2xx status.
    #[error("server responded with {status}")]
    Status {
        /// The response status
        status: StatusCode,
        /// The parsed response body
        body: Value,
    },

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Returns the HTTP status for `Status` errors.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Port for issuing HTTP requests.
///
/// Adapters implement [`HttpClient::send`]; the verb helpers mirror the
/// shape resources call and build the matching [`ApiRequest`].
pub trait HttpClient: Send + Sync {
    /// Sends a request and resolves with the response.
    ///
    /// # Errors
    ///
    /// Resolves with `HttpClientError` on network failure, timeout or a
    /// non-2xx status.
    fn send(&self, request: ApiRequest) -> HttpFuture<'_>;

    /// Issues a GET request.
    fn get(&self, url: &str, config: RequestConfig) -> HttpFuture<'_> {
        self.send(ApiRequest::get(url).with_config(config))
    }

    /// Issues a POST request with a JSON body.
    fn post(&self, url: &str, body: Value, config: RequestConfig) -> HttpFuture<'_> {
        self.send(ApiRequest::post(url, body).with_config(config))
    }

    /// Issues a PUT request with a JSON body.
    fn put(&self, url: &str, body: Value, config: RequestConfig) -> HttpFuture<'_> {
        self.send(ApiRequest::put(url, body).with_config(config))
    }

    /// Issues a DELETE request.
    fn delete(&self, url: &str, config: RequestConfig) -> HttpFuture<'_> {
        self.send(ApiRequest::delete(url).with_config(config))
    }
}
