//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The resource route is empty or carries a scheme/host.
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    /// No `baseURL` option was supplied to a resource.
    #[error("missing base URL: set the `baseURL` option before creating resources")]
    MissingBaseUrl,

    /// An option has a value of the wrong shape.
    #[error("invalid option `{key}`: {reason}")]
    InvalidOption {
        /// The option name
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Search parameters could not be encoded as a query string.
    #[error("invalid search parameters: {0}")]
    InvalidSearchParams(String),

    /// A request body could not be serialized to JSON.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A response payload could not be turned into a model.
    #[error("model mapping failed: {0}")]
    Mapping(String),
}

impl DomainError {
    /// Creates an `InvalidOption` error.
    #[must_use]
    pub fn invalid_option(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
