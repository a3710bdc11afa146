//! The success/failure envelope returned by mutating gateway operations.
//!
//! Every create/update/cancel call produces exactly one of two outcomes: a
//! constructed resource entity, or the gateway's structured validation
//! rejection. The rejection is part of normal control flow, a value rather
//! than a raised error, and stays distinct from the exceptional conditions
//! in [`crate::error::GatewayError`].

use std::collections::BTreeMap;

use crate::error::GatewayError;
use crate::resource::Resource;
use crate::value::{Map, Value};

/// Top-level response key marking a validation rejection.
pub const API_ERROR_KEY: &str = "api_error_response";

/// Outcome of a mutating gateway operation.
#[derive(Debug)]
pub enum ApiResult<R> {
    /// The gateway accepted the request and returned the resource.
    Success(R),
    /// The gateway rejected the request with validation errors.
    Failure(ValidationErrors),
}

impl<R: Resource> ApiResult<R> {
    /// Classifies a parsed response body.
    ///
    /// Inspects the single designated top-level key: the resource kind for
    /// success, [`API_ERROR_KEY`] for a validation failure.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UnexpectedResponse`] if neither key is
    /// present. That is a protocol mismatch, not a business outcome.
    pub fn from_response(mut response: Map) -> Result<Self, GatewayError> {
        if let Some(payload) = response.remove(R::KIND) {
            let map = payload.into_map().ok_or(GatewayError::UnexpectedResponse {
                expected: R::KIND,
                found: format!("non-mapping `{}` payload", R::KIND),
            })?;
            return Ok(Self::Success(R::from_map(map)?));
        }

        if let Some(payload) = response.remove(API_ERROR_KEY) {
            let map = payload.into_map().unwrap_or_default();
            return Ok(Self::Failure(ValidationErrors::from_map(map)));
        }

        Err(GatewayError::UnexpectedResponse {
            expected: R::KIND,
            found: response.keys().cloned().collect::<Vec<_>>().join(", "),
        })
    }

    /// Returns `true` for the success arm.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Borrows the entity, if this is a success.
    #[must_use]
    pub const fn entity(&self) -> Option<&R> {
        match self {
            Self::Success(entity) => Some(entity),
            Self::Failure(_) => None,
        }
    }

    /// Borrows the validation errors, if this is a failure.
    #[must_use]
    pub const fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Success(_) => None,
            Self::Failure(errors) => Some(errors),
        }
    }

    /// Consumes the result, returning the entity if this is a success.
    #[must_use]
    pub fn into_entity(self) -> Option<R> {
        match self {
            Self::Success(entity) => Some(entity),
            Self::Failure(_) => None,
        }
    }
}

/// One field-level validation error from the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The parameter the error applies to.
    pub attribute: String,
    /// The gateway's numeric error code, as transmitted.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

/// The structured validation-error payload of a rejected request.
///
/// Errors are grouped by object: the top level holds the groups (e.g.
/// `subscription`), each group holds its field errors plus further nested
/// groups. The raw payload is kept as parsed, so callers that need shapes
/// this view does not model can still reach them.
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    message: Option<String>,
    errors: Vec<ValidationError>,
    nested: BTreeMap<String, ValidationErrors>,
    raw: Map,
}

impl ValidationErrors {
    /// Builds the structured view from the `api_error_response` payload.
    #[must_use]
    pub fn from_map(payload: Map) -> Self {
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let mut top = payload
            .get("errors")
            .and_then(Value::as_map)
            .map(Self::group_from)
            .unwrap_or_default();
        top.message = message;
        top.raw = payload;
        top
    }

    /// Parses one error group: an `errors` array of field errors plus
    /// map-valued keys as nested groups.
    fn group_from(map: &Map) -> Self {
        let mut errors = Vec::new();
        let mut nested = BTreeMap::new();

        for (key, value) in map {
            if key == "errors" {
                if let Value::List(items) = value {
                    errors.extend(items.iter().filter_map(|item| {
                        item.as_map().map(|error| ValidationError {
                            attribute: field(error, "attribute"),
                            code: field(error, "code"),
                            message: field(error, "message"),
                        })
                    }));
                }
            } else if let Value::Map(inner) = value {
                nested.insert(key.clone(), Self::group_from(inner));
            }
        }

        Self {
            message: None,
            errors,
            nested,
            raw: Map::new(),
        }
    }

    /// The gateway's top-level human-readable message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Field errors at this level.
    #[must_use]
    pub fn all(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Field errors at this level for one attribute.
    #[must_use]
    pub fn on(&self, attribute: &str) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|error| error.attribute == attribute)
            .collect()
    }

    /// Looks up a nested error group by object name.
    #[must_use]
    pub fn for_object(&self, name: &str) -> Option<&Self> {
        self.nested.get(name)
    }

    /// Total error count including all nested groups.
    #[must_use]
    pub fn deep_size(&self) -> usize {
        self.errors.len()
            + self
                .nested
                .values()
                .map(ValidationErrors::deep_size)
                .sum::<usize>()
    }

    /// The full `api_error_response` payload, exactly as parsed.
    #[must_use]
    pub fn raw(&self) -> &Map {
        &self.raw
    }
}

fn field(map: &Map, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::subscription::Subscription;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn map(pairs: &[(&str, Value)]) -> Map {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    fn error_entry(attribute: &str, code: &str, message: &str) -> Value {
        Value::Map(map(&[
            ("attribute", Value::from(attribute)),
            ("code", Value::from(code)),
            ("message", Value::from(message)),
        ]))
    }

    fn api_error_payload() -> Map {
        map(&[
            ("message", Value::from("Price is invalid.")),
            (
                "errors",
                Value::Map(map(&[(
                    "subscription",
                    Value::Map(map(&[
                        (
                            "errors",
                            Value::List(vec![error_entry(
                                "price",
                                "81904",
                                "Price is invalid.",
                            )]),
                        ),
                        (
                            "options",
                            Value::Map(map(&[(
                                "errors",
                                Value::List(vec![error_entry(
                                    "start_immediately",
                                    "91502",
                                    "Cannot start immediately.",
                                )]),
                            )])),
                        ),
                    ])),
                )])),
            ),
        ])
    }

    #[test]
    fn test_success_key_builds_entity() {
        let response = map(&[(
            "subscription",
            Value::Map(map(&[
                ("id", Value::from("x")),
                ("price", Value::from("9.99")),
            ])),
        )]);

        let result = ApiResult::<Subscription>::from_response(response).unwrap();
        assert!(result.is_success());
        let entity = result.entity().unwrap();
        assert_eq!(entity.id.as_deref(), Some("x"));
        assert_eq!(entity.price, Some(Decimal::from_str("9.99").unwrap()));
    }

    #[test]
    fn test_error_key_builds_failure() {
        let response = map(&[(API_ERROR_KEY, Value::Map(api_error_payload()))]);
        let result = ApiResult::<Subscription>::from_response(response).unwrap();
        assert!(!result.is_success());

        let errors = result.errors().unwrap();
        assert_eq!(errors.message(), Some("Price is invalid."));

        let subscription = errors.for_object("subscription").unwrap();
        assert_eq!(subscription.all().len(), 1);
        assert_eq!(subscription.on("price")[0].code, "81904");

        let options = subscription.for_object("options").unwrap();
        assert_eq!(options.on("start_immediately")[0].code, "91502");

        assert_eq!(errors.deep_size(), 2);
    }

    #[test]
    fn test_failure_keeps_raw_payload_unchanged() {
        let payload = api_error_payload();
        let response = map(&[(API_ERROR_KEY, Value::Map(payload.clone()))]);
        let result = ApiResult::<Subscription>::from_response(response).unwrap();
        assert_eq!(result.errors().unwrap().raw(), &payload);
    }

    #[test]
    fn test_neither_key_is_a_protocol_violation() {
        let response = map(&[("something_else", Value::Nil)]);
        let err = ApiResult::<Subscription>::from_response(response).unwrap_err();
        match err {
            GatewayError::UnexpectedResponse { expected, found } => {
                assert_eq!(expected, "subscription");
                assert_eq!(found, "something_else");
            }
            other => panic!("wrong error: {other}"),
        }
    }

    #[test]
    fn test_exactly_one_arm_is_ever_produced() {
        let response = map(&[(
            "subscription",
            Value::Map(map(&[("id", Value::from("x"))])),
        )]);
        let result = ApiResult::<Subscription>::from_response(response).unwrap();
        assert!(result.entity().is_some());
        assert!(result.errors().is_none());
    }
}
