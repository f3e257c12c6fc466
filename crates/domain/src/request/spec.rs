//! Request specification
//!
//! An `ApiRequest` is everything a transport needs to issue one call:
//! method, URL, optional JSON body and the caller's per-call config.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{HttpMethod, RequestConfig};

/// A single HTTP request issued by a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Target URL, absolute or root-relative
    pub url: String,
    /// JSON body for POST and PUT
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Caller-supplied settings
    #[serde(default)]
    pub config: RequestConfig,
}

impl ApiRequest {
    /// Creates a request without body or extra config.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            config: RequestConfig::default(),
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a POST request with a JSON body.
    #[must_use]
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, url).with_body(body)
    }

    /// Creates a PUT request with a JSON body.
    #[must_use]
    pub fn put(url: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Put, url).with_body(body)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the per-call configuration.
    #[must_use]
    pub fn with_config(mut self, config: RequestConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns true if the URL has no scheme and must be resolved
    /// against an origin before sending.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        !self.url.contains("://")
    }
}
