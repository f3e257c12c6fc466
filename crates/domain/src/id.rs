//! Resource identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The primary key of a single resource, as it appears in the URL path.
///
/// Identifiers are rendered verbatim: no encoding and no validation is
/// applied, so an empty identifier produces a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<&String> for ResourceId {
    fn from(id: &String) -> Self {
        Self(id.clone())
    }
}

impl From<&Self> for ResourceId {
    fn from(id: &Self) -> Self {
        id.clone()
    }
}

impl From<Uuid> for ResourceId {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ResourceId {
                fn from(id: $ty) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_integer() {
        assert_eq!(ResourceId::from(5_u32).as_str(), "5");
        assert_eq!(ResourceId::from(-1_i64).as_str(), "-1");
    }

    #[test]
    fn test_from_string() {
        assert_eq!(ResourceId::from("abc").to_string(), "abc");
        assert_eq!(ResourceId::from(String::from("x-1")).as_str(), "x-1");
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::now_v7();
        assert_eq!(ResourceId::from(uuid).as_str(), uuid.to_string());
    }

    #[test]
    fn test_empty_id_is_kept() {
        assert_eq!(ResourceId::from("").as_str(), "");
    }
}
