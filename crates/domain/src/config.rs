//! Resource configuration options.
//!
//! A `ResourceConfig` is a flat mapping from option name to JSON value.
//! Options are layered by shallow merge: keys from the overriding map
//! replace keys of the same name, everything else is kept.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// Option key holding the prefix prepended to every resource route.
pub const BASE_URL_KEY: &str = "baseURL";

/// A mapping of option names to values.
///
/// # Example
///
/// ```
/// use restkit_domain::ResourceConfig;
///
/// let global = ResourceConfig::new().with_base_url("/api");
/// let local = ResourceConfig::new().with_base_url("/v2");
///
/// let effective = global.merged(&local);
/// assert_eq!(effective.base_url().unwrap(), "/v2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceConfig {
    options: Map<String, Value>,
}

impl ResourceConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `baseURL` option.
    #[must_use]
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        self.with(BASE_URL_KEY, Value::String(base_url.into()))
    }

    /// Sets an arbitrary option.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Shallow-merges `other` into this configuration.
    ///
    /// Keys present in `other` overwrite existing keys; new keys are added.
    /// Nothing is ever removed.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in &other.options {
            self.options.insert(key.clone(), value.clone());
        }
    }

    /// Returns a copy of this configuration with `overrides` merged on top.
    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        let mut merged = self.clone();
        merged.merge(overrides);
        merged
    }

    /// Returns the value of an option.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Returns the `baseURL` option.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingBaseUrl` if the option is absent and
    /// `DomainError::InvalidOption` if it is not a string. An empty string
    /// is accepted and yields root-relative routes.
    pub fn base_url(&self) -> DomainResult<&str> {
        match self.options.get(BASE_URL_KEY) {
            None => Err(DomainError::MissingBaseUrl),
            Some(Value::String(url)) => Ok(url),
            Some(other) => Err(DomainError::invalid_option(
                BASE_URL_KEY,
                format!("expected a string, got {other}"),
            )),
        }
    }

    /// Returns the underlying option map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.options
    }

    /// Returns the number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns true if no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl From<Map<String, Value>> for ResourceConfig {
    fn from(options: Map<String, Value>) -> Self {
        Self { options }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ResourceConfig {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            options: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
