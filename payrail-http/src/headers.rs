//! Request header values for gateway authentication and content negotiation.

use base64::prelude::*;

/// Wire format version sent with every request.
pub const API_VERSION: &str = "3";

/// Both request and response bodies are XML.
pub const CONTENT_TYPE: &str = "application/xml";

/// User agent identifying this client version.
pub const USER_AGENT: &str = concat!("payrail-rs ", env!("CARGO_PKG_VERSION"));

/// Builds the `Authorization` header value from an API key pair.
#[must_use]
pub fn basic_auth(public_key: &str, private_key: &str) -> String {
    let credentials = format!("{public_key}:{private_key}");
    format!("Basic {}", BASE64_STANDARD.encode(credentials))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_encodes_key_pair() {
        // base64("user:pass")
        assert_eq!(basic_auth("user", "pass"), "Basic dXNlcjpwYXNz");
    }
}
