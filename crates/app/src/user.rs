//! The `users` model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user as returned by the API.
///
/// Every field of the payload is kept: `id` is lifted out and the rest is
/// carried in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server identifier, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Remaining payload fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
