//! Restkit Application - Resources and ports
//!
//! This crate defines the application layer with:
//! - The `HttpClient` port (interface to the transport)
//! - The `ConfigStore` of default resource options
//! - `Resource` and `ResourceFactory`
//! - Application-level error handling

pub mod config_store;
pub mod error;
pub mod factory;
pub mod ports;
pub mod resource;

#[cfg(test)]
mod testing;

pub use config_store::ConfigStore;
pub use error::{ResourceError, ResourceResult};
pub use factory::ResourceFactory;
pub use ports::{HttpClient, HttpClientError, HttpFuture};
pub use resource::Resource;
