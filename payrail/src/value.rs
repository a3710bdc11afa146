//! The native value tree exchanged between the marshalling layer and the
//! rest of the client.
//!
//! A [`Value`] is what the gateway's XML documents parse into and what
//! request parameter maps are built from. The variants mirror the wire
//! format's type vocabulary exactly: there is no general "number" kind,
//! integers and fixed-point decimals are distinct so that round trips never
//! go through floating point.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A string-keyed mapping of native values.
///
/// `BTreeMap` keeps keys in a deterministic order, which makes serializing
/// the same map twice produce byte-identical output.
pub type Map = BTreeMap<String, Value>;

/// A native value: one of the gateway's scalar kinds, a nested mapping, or
/// an ordered sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The explicit null marker (`nil="true"` on the wire).
    Nil,
    /// A boolean (`type="boolean"`).
    Bool(bool),
    /// A signed integer (`type="integer"`).
    Int(i64),
    /// A fixed-point decimal (`type="bigdecimal"`). Never constructed via
    /// floating point.
    Decimal(Decimal),
    /// A UTC timestamp (`type="datetime"`), second precision.
    Timestamp(DateTime<Utc>),
    /// Escaped text content with no type attribute.
    Str(String),
    /// A nested mapping of underscore-separated keys to values.
    Map(Map),
    /// An ordered sequence (`type="array"`).
    List(Vec<Value>),
}

impl Value {
    /// Returns the contained string, if this is a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contained map, if this is a [`Value::Map`].
    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the contained list, if this is a [`Value::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` if this is the null marker.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Consumes the value and returns the inner map, if any.
    #[must_use]
    pub fn into_map(self) -> Option<Map> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Self::Map(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_variants() {
        let mut map = Map::new();
        map.insert("id".to_owned(), Value::from("abc"));
        let value = Value::Map(map);

        assert!(value.as_map().is_some());
        assert!(value.as_str().is_none());
        assert!(!value.is_nil());
        assert_eq!(
            value.as_map().unwrap().get("id").unwrap().as_str(),
            Some("abc")
        );
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i64), Value::Int(42));
        assert_eq!(Value::from("x"), Value::Str("x".to_owned()));
        assert_eq!(
            Value::from(vec![Value::Int(1)]),
            Value::List(vec![Value::Int(1)])
        );
    }
}
