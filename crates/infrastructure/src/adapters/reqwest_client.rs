//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It handles all HTTP communication for resources.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::{Client, Method};
use restkit_application::ports::{HttpClient, HttpClientError, HttpFuture};
use restkit_domain::{ApiRequest, ApiResponse, HttpMethod, StatusCode};
use url::Url;

const MAX_REDIRECTS: usize = 10;

/// Default timeout applied when a call does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("restkit/", env!("CARGO_PKG_VERSION"));

/// HTTP client implementation using reqwest.
///
/// Root-relative URLs such as `/api/users` are resolved against the
/// configured origin; without one they are rejected as invalid.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    origin: Option<Url>,
    default_timeout: Duration,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Request timeout: 30 seconds
    /// - Follow redirects: up to 10
    /// - User-Agent: "restkit/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Creates a new HTTP client sending the given `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_user_agent(user_agent: &str) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self::with_client(client))
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self {
            client,
            origin: None,
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the origin used to resolve root-relative URLs.
    #[must_use]
    pub fn with_origin(mut self, origin: Url) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Sets the timeout used when a call does not set one.
    #[must_use]
    pub const fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Returns the configured origin.
    #[must_use]
    pub const fn origin(&self) -> Option<&Url> {
        self.origin.as_ref()
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Builds the final URL: resolves against the origin and appends the
    /// caller's extra query pairs.
    fn resolve_url(&self, request: &ApiRequest) -> Result<Url, HttpClientError> {
        let mut url = if request.is_relative() {
            let origin = self.origin.as_ref().ok_or_else(|| {
                HttpClientError::InvalidUrl(format!(
                    "relative URL needs an origin: {}",
                    request.url
                ))
            })?;
            origin.join(&request.url)
        } else {
            Url::parse(&request.url)
        }
        .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;

        if !request.config.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.config.query);
        }

        Ok(url)
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = format!("{error:?}").to_lowercase();
            if message.contains("dns") || message.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message: error.to_string(),
                };
            }
            if message.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(error.to_string());
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(error.to_string())
    }

    fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect()
    }
}

impl HttpClient for ReqwestHttpClient {
    fn send(&self, request: ApiRequest) -> HttpFuture<'_> {
        Box::pin(async move {
            let url = self.resolve_url(&request)?;
            let timeout = request.config.timeout.unwrap_or(self.default_timeout);
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), url.clone())
                .timeout(timeout);

            for header in &request.config.headers {
                builder = builder.header(&header.name, &header.value);
            }

            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder.send().await.map_err(|e| {
                let error = Self::map_error(&e, timeout_ms);
                tracing::warn!(method = %request.method, %url, %error, "request failed");
                error
            })?;

            let status = StatusCode::new(response.status().as_u16());
            let headers = Self::collect_headers(response.headers());
            let body = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::Other(format!("failed to read body: {e}")))?;
            let data = ApiResponse::parse_body(&body);
            let duration = start.elapsed();

            tracing::debug!(
                method = %request.method,
                %url,
                status = status.as_u16(),
                elapsed_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                "response received"
            );

            if !status.is_success() {
                return Err(HttpClientError::Status { status, body: data });
            }

            Ok(ApiResponse::new(status, headers, data, duration))
        })
    }
}
