//! Model mapping for response payloads.
//!
//! A resource either hands raw JSON back to the caller (`Passthrough`) or
//! maps every payload through a `ModelMapper`. Single-object responses go
//! through [`ModelMapper::map_one`], search results through
//! [`ModelMapper::map_many`].

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Turns raw response payloads into domain objects.
pub trait ModelMapper: Send + Sync {
    /// Result of mapping a single object.
    type Output: Send;
    /// Result of mapping a search payload.
    type List: Send;

    /// Maps a single-object payload.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Mapping` if the payload does not fit the model.
    fn map_one(&self, raw: Value) -> DomainResult<Self::Output>;

    /// Maps a search payload.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Mapping` if the payload does not fit the model.
    fn map_many(&self, raw: Value) -> DomainResult<Self::List>;
}

/// No mapping: payloads are returned exactly as received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Passthrough;

impl ModelMapper for Passthrough {
    type Output = Value;
    type List = Value;

    fn map_one(&self, raw: Value) -> DomainResult<Value> {
        Ok(raw)
    }

    fn map_many(&self, raw: Value) -> DomainResult<Value> {
        Ok(raw)
    }
}

/// Maps payloads through a plain function, like a model constructor.
pub struct FnMapper<F, T> {
    map: F,
    _model: PhantomData<fn() -> T>,
}

impl<F, T> FnMapper<F, T>
where
    F: Fn(Value) -> T,
{
    /// Wraps a mapping function.
    pub const fn new(map: F) -> Self {
        Self {
            map,
            _model: PhantomData,
        }
    }
}

impl<F, T> fmt::Debug for FnMapper<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMapper").finish_non_exhaustive()
    }
}

impl<F, T> ModelMapper for FnMapper<F, T>
where
    F: Fn(Value) -> T + Send + Sync,
    T: Send,
{
    type Output = T;
    type List = Vec<T>;

    fn map_one(&self, raw: Value) -> DomainResult<T> {
        Ok((self.map)(raw))
    }

    fn map_many(&self, raw: Value) -> DomainResult<Vec<T>> {
        into_items(raw).map(|items| items.into_iter().map(&self.map).collect())
    }
}

/// Maps payloads by deserializing them into `T`.
pub struct SerdeModel<T> {
    _model: PhantomData<fn() -> T>,
}

impl<T> SerdeModel<T> {
    /// Creates the mapper.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _model: PhantomData,
        }
    }
}

impl<T> Default for SerdeModel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeModel<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SerdeModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeModel")
            .field("model", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> ModelMapper for SerdeModel<T>
where
    T: DeserializeOwned + Send,
{
    type Output = T;
    type List = Vec<T>;

    fn map_one(&self, raw: Value) -> DomainResult<T> {
        serde_json::from_value(raw).map_err(|e| DomainError::Mapping(e.to_string()))
    }

    fn map_many(&self, raw: Value) -> DomainResult<Vec<T>> {
        into_items(raw)?
            .into_iter()
            .map(|item| self.map_one(item))
            .collect()
    }
}

/// Splits a search payload into the items to map.
///
/// Arrays yield their elements, objects their values in insertion order,
/// and `null` (an empty body) yields nothing. Scalars cannot be mapped.
fn into_items(raw: Value) -> DomainResult<Vec<Value>> {
    match raw {
        Value::Array(items) => Ok(items),
        Value::Object(fields) => Ok(fields.into_iter().map(|(_, value)| value).collect()),
        Value::Null => Ok(Vec::new()),
        other => Err(DomainError::Mapping(format!(
            "expected a JSON array or object, got {}",
            kind_of(&other)
        ))),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
