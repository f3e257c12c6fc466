//! Infrastructure adapters

mod reqwest_client;

pub use reqwest_client::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ReqwestHttpClient};
