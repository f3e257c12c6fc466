//! Search parameter types

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Ordered query parameters for a search request.
///
/// Pairs are encoded in insertion order as `key=value`, joined by `&`,
/// with both sides percent-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Builds parameters from any flat serializable value.
    ///
    /// Structs and maps whose fields are scalars are supported; `None`
    /// fields are skipped.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSearchParams` if the value cannot be
    /// represented as flat `key=value` pairs.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> DomainResult<Self> {
        let encoded = serde_urlencoded::to_string(value)
            .map_err(|e| DomainError::InvalidSearchParams(e.to_string()))?;
        let pairs = serde_urlencoded::from_str(&encoded)
            .map_err(|e| DomainError::InvalidSearchParams(e.to_string()))?;
        Ok(Self { pairs })
    }

    /// Appends a parameter.
    pub fn add(&mut self, key: impl Into<String>, value: impl ToString) {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// Appends a parameter, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.add(key, value);
        self
    }

    /// Returns the parameters in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Returns the number of parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encodes the parameters as a query string without the leading `?`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSearchParams` if encoding fails.
    pub fn to_query_string(&self) -> DomainResult<String> {
        serde_urlencoded::to_string(&self.pairs)
            .map_err(|e| DomainError::InvalidSearchParams(e.to_string()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for SearchParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: ToString, const N: usize> From<[(K, V); N]> for SearchParams {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
