//! The seam between gateway logic and the HTTP layer.
//!
//! Gateways speak in native maps; how those maps travel (encoding, auth,
//! status handling) belongs behind [`Transport`]. The `payrail-http` crate
//! provides the production implementation; tests substitute their own.

use crate::error::TransportError;
use crate::value::Map;

/// A synchronous channel to the gateway.
///
/// Paths are relative to the authenticated merchant, e.g.
/// `/subscriptions/{id}`. Bodies and responses are the parsed native form;
/// implementations own the wire encoding.
pub trait Transport {
    /// Fetches a resource.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::NotFound`] when the path does not resolve,
    /// or another variant for transport-level failures.
    fn get(&self, path: &str) -> Result<Map, TransportError>;

    /// Creates a resource from the given parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] for any transport-level failure.
    /// Validation rejections are not errors here: the gateway returns them
    /// in the parsed body.
    fn post(&self, path: &str, body: &Map) -> Result<Map, TransportError>;

    /// Updates a resource. `body` is `None` for bodiless state transitions
    /// such as cancellation.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] for any transport-level failure.
    fn put(&self, path: &str, body: Option<&Map>) -> Result<Map, TransportError>;
}
