//! Restkit Domain - Core types
//!
//! This crate defines the domain model for the restkit REST resource client:
//! configuration options, request and response shapes, identifiers and
//! model mappers. All types here are pure Rust with no I/O dependencies.

pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod request;
pub mod response;

pub use config::{BASE_URL_KEY, ResourceConfig};
pub use error::{DomainError, DomainResult};
pub use id::ResourceId;
pub use model::{FnMapper, ModelMapper, Passthrough, SerdeModel};
pub use request::{ApiRequest, Header, HttpMethod, RequestConfig, SearchParams};
pub use response::{ApiResponse, StatusCode};
