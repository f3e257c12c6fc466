//! Restkit Infrastructure - Adapters and implementations
//!
//! This crate provides the reqwest implementation of the `HttpClient`
//! port and the loading of client settings.

pub mod adapters;
pub mod settings;

pub use adapters::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ReqwestHttpClient};
pub use settings::{ClientSettings, ENV_PREFIX, SettingsError};
