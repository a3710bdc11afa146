//! Resource entities: typed views over parsed gateway responses.
//!
//! Each entity implements [`Resource`], naming the top-level response key
//! it answers to and building itself from the parsed payload. Fields the
//! typed view does not model are retained in the entity's `extra` map, so
//! gateway additions never break parsing.

pub mod subscription;
pub mod transaction;

use rust_decimal::Decimal;

use crate::error::GatewayError;
use crate::value::{Map, Value};

/// A typed gateway resource.
pub trait Resource: Sized {
    /// The top-level response key carrying this resource.
    const KIND: &'static str;

    /// Builds the entity from the parsed payload under [`Self::KIND`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Coercion`] when a field is present but has
    /// an incompatible shape. Absent and nil fields are never errors.
    fn from_map(map: Map) -> Result<Self, GatewayError>;
}

/// Removes `field` as a string. Nil and absent both yield `None`.
pub(crate) fn take_string(map: &mut Map, field: &'static str) -> Result<Option<String>, GatewayError> {
    match map.remove(field) {
        None | Some(Value::Nil) => Ok(None),
        Some(Value::Str(s)) => Ok(Some(s)),
        Some(other) => Err(coercion(field, "string", &other)),
    }
}

/// Removes `field` as a decimal. Accepts the typed wire form, a decimal
/// string, or an integer.
pub(crate) fn take_decimal(map: &mut Map, field: &'static str) -> Result<Option<Decimal>, GatewayError> {
    match map.remove(field) {
        None | Some(Value::Nil) => Ok(None),
        Some(Value::Decimal(d)) => Ok(Some(d)),
        Some(Value::Int(n)) => Ok(Some(Decimal::from(n))),
        Some(Value::Str(s)) => Decimal::from_str_exact(&s)
            .map(Some)
            .map_err(|e| GatewayError::Coercion {
                field,
                reason: format!("`{s}` is not a decimal: {e}"),
            }),
        Some(other) => Err(coercion(field, "decimal", &other)),
    }
}

/// Removes `field` as a boolean.
pub(crate) fn take_bool(map: &mut Map, field: &'static str) -> Result<Option<bool>, GatewayError> {
    match map.remove(field) {
        None | Some(Value::Nil) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(other) => Err(coercion(field, "boolean", &other)),
    }
}

/// Removes `field` as an integer.
pub(crate) fn take_int(map: &mut Map, field: &'static str) -> Result<Option<i64>, GatewayError> {
    match map.remove(field) {
        None | Some(Value::Nil) => Ok(None),
        Some(Value::Int(n)) => Ok(Some(n)),
        Some(other) => Err(coercion(field, "integer", &other)),
    }
}

fn coercion(field: &'static str, expected: &str, found: &Value) -> GatewayError {
    GatewayError::Coercion {
        field,
        reason: format!("expected {expected}, found {}", kind_of(found)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Nil => "nil",
        Value::Bool(_) => "boolean",
        Value::Int(_) => "integer",
        Value::Decimal(_) => "decimal",
        Value::Timestamp(_) => "timestamp",
        Value::Str(_) => "string",
        Value::Map(_) => "mapping",
        Value::List(_) => "list",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn map(pairs: &[(&str, Value)]) -> Map {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn test_take_string_handles_absent_and_nil() {
        let mut m = map(&[("a", Value::Nil)]);
        assert_eq!(take_string(&mut m, "a").unwrap(), None);
        assert_eq!(take_string(&mut m, "missing").unwrap(), None);
    }

    #[test]
    fn test_take_decimal_accepts_string_int_and_decimal() {
        let exact = Decimal::from_str("12.00").unwrap();
        let mut m = map(&[
            ("s", Value::from("12.00")),
            ("i", Value::Int(12)),
            ("d", Value::Decimal(exact)),
        ]);
        assert_eq!(take_decimal(&mut m, "s").unwrap(), Some(exact));
        assert_eq!(take_decimal(&mut m, "i").unwrap(), Some(Decimal::from(12)));
        assert_eq!(take_decimal(&mut m, "d").unwrap(), Some(exact));
    }

    #[test]
    fn test_take_decimal_rejects_garbage() {
        let mut m = map(&[("price", Value::from("not-a-price"))]);
        let err = take_decimal(&mut m, "price").unwrap_err();
        assert!(matches!(err, GatewayError::Coercion { field: "price", .. }));
    }

    #[test]
    fn test_wrong_shape_names_the_field() {
        let mut m = map(&[("trial_period", Value::from("yes"))]);
        let err = take_bool(&mut m, "trial_period").unwrap_err();
        match err {
            GatewayError::Coercion { field, reason } => {
                assert_eq!(field, "trial_period");
                assert!(reason.contains("string"));
            }
            other => panic!("wrong error: {other}"),
        }
    }

    #[test]
    fn test_take_int() {
        let mut m = map(&[("n", Value::Int(7))]);
        assert_eq!(take_int(&mut m, "n").unwrap(), Some(7));
        assert!(m.is_empty());
    }
}
