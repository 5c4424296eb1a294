use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A raw stored record: attribute name to typed value. An empty record is a non-entry.
pub type Item = BTreeMap<String, AttributeValue>;

/// A typed attribute value, as transmitted by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// A string.
    S(String),
    /// A number, kept in its decimal text form.
    N(String),
    /// Binary data.
    B(Vec<u8>),
    /// A boolean.
    Bool(bool),
    /// An explicit null.
    Null,
    /// A list of arbitrary values.
    L(Vec<AttributeValue>),
    /// A nested record.
    M(Item),
    /// A string set.
    Ss(Vec<String>),
    /// A number set.
    Ns(Vec<String>),
}

impl AttributeValue {
    /// Returns the string value, if this is a string.
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number text, if this is a number.
    pub fn as_n(&self) -> Option<&str> {
        match self {
            Self::N(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Checks whether the value may be used as a table key attribute.
    pub fn is_key_type(&self) -> bool {
        matches!(self, Self::S(_) | Self::N(_) | Self::B(_))
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::S(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::S(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(b: Vec<u8>) -> Self {
        Self::B(b)
    }
}

impl From<u64> for AttributeValue {
    fn from(n: u64) -> Self {
        Self::N(n.to_string())
    }
}
