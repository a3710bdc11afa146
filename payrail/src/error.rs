//! Error taxonomy for gateway operations.
//!
//! Two kinds of failure exist and are deliberately kept apart: exceptional
//! conditions (malformed wire data, protocol mismatches, missing resources)
//! surface as [`GatewayError`] values through `Result`, while ordinary
//! validation rejections from the gateway are *not* errors and come back
//! as the failure arm of [`crate::result::ApiResult`].

use crate::signature::InvalidKeysError;
use crate::xml::XmlError;

/// Base error type for gateway operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// Parameter keys outside the operation's signature. Raised before any
    /// I/O happens.
    #[error(transparent)]
    InvalidKeys(#[from] InvalidKeysError),

    /// Wire payload could not be serialized or deserialized.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// A response field could not be coerced to its declared entity type.
    #[error("cannot coerce field `{field}`: {reason}")]
    Coercion {
        /// The entity field being populated.
        field: &'static str,
        /// Why the wire value was rejected.
        reason: String,
    },

    /// The response carried neither the expected resource key nor the
    /// API error marker. Signals a protocol mismatch between client and
    /// server versions.
    #[error("unexpected response: expected `{expected}` or `api_error_response`, got `{found}`")]
    UnexpectedResponse {
        /// The resource key the caller asked for.
        expected: &'static str,
        /// The top-level keys actually present.
        found: String,
    },

    /// A lookup-by-id operation did not find the resource server-side.
    #[error("{0}")]
    NotFound(String),

    /// The transport failed to complete the round trip.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors produced by a [`crate::transport::Transport`] implementation.
///
/// The HTTP status mapping is fixed by the gateway's API contract: anything
/// other than 200/201/422 is a transport-level failure, never a parseable
/// response body.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
    /// 401: the public/private key pair was rejected.
    #[error("authentication failed: check your public and private keys")]
    Authentication,

    /// 403: the credentials are valid but not permitted this operation.
    #[error("authorization failed for this request")]
    Authorization,

    /// 404: the requested resource does not exist.
    #[error("resource not found: {path}")]
    NotFound {
        /// The request path that produced the 404.
        path: String,
    },

    /// 426: the client library version is no longer accepted.
    #[error("the client library must be upgraded")]
    UpgradeRequired,

    /// 500: the gateway failed internally.
    #[error("the gateway reported an internal error")]
    Server,

    /// 503: the gateway is down for maintenance.
    #[error("the gateway is down for maintenance")]
    Maintenance,

    /// Any other status outside the API contract.
    #[error("unexpected HTTP status {status}")]
    UnexpectedStatus {
        /// The offending status code.
        status: u16,
    },

    /// The response body was not the wire format the transport expected.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// The underlying HTTP client failed before a status was available.
    #[error("HTTP error: {0}")]
    Http(String),
}
