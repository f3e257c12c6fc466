//! HTTP request domain types

mod config;
mod method;
mod query;
mod spec;

pub use config::{Header, RequestConfig};
pub use method::HttpMethod;
pub use query::SearchParams;
pub use spec::ApiRequest;
