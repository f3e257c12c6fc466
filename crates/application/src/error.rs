//! Application error types

use restkit_domain::DomainError;
use thiserror::Error;

use crate::ports::HttpClientError;

/// Errors returned by resource construction and resource operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// The resource could not be constructed from its options.
    #[error("configuration error: {0}")]
    Config(DomainError),

    /// The request could not be built (body or query encoding).
    #[error("request error: {0}")]
    Request(DomainError),

    /// The transport failed; the inner error is passed through verbatim.
    #[error(transparent)]
    Transport(#[from] HttpClientError),

    /// The response payload did not fit the model.
    #[error("mapping error: {0}")]
    Mapping(DomainError),
}

impl ResourceError {
    /// Returns the transport error, if this is one.
    #[must_use]
    pub const fn as_transport(&self) -> Option<&HttpClientError> {
        match self {
            Self::Transport(error) => Some(error),
            _ => None,
        }
    }
}

/// Result type alias for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;
