//! Identifiers for ingredients and products.
//!
//! The backend assigns database ids, which arrive as JSON numbers (or, from
//! some deployments, strings). A product that has not been persisted yet
//! carries a locally generated placeholder instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Backend-assigned identifier, preserved in its wire form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(i64),
    Text(String),
}

impl Identifier {
    /// True for an empty textual id.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Identifier {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Identity of a product.
///
/// `Local` ids exist only until the persistence endpoint confirms the
/// product; they are never sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductId {
    /// Assigned by the persistence endpoint
    Persisted(Identifier),
    /// Generated on this client before persistence confirmed
    Local(String),
}

impl ProductId {
    /// Generate a placeholder id from the scan timestamp.
    #[must_use]
    pub fn local(now: DateTime<Utc>) -> Self {
        Self::Local(format!("local-{}", now.timestamp_millis()))
    }

    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted(_))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Persisted(id) => id.is_empty(),
            Self::Local(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persisted(id) => write!(f, "{id}"),
            Self::Local(s) => f.write_str(s),
        }
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Persisted(id) => id.serialize(serializer),
            Self::Local(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Identifier::deserialize(deserializer).map(Self::Persisted)
    }
}
