//! The gateway's XML wire codec.
//!
//! This is not a general XML library: it round-trips exactly the gateway's
//! conventions and nothing more.
//!
//! # Wire conventions
//!
//! - Element names are dash-separated; native keys are underscore-separated.
//!   The two are deterministically interconvertible.
//! - A `type` attribute governs how element content is interpreted:
//!   `array`, `integer`, `bigdecimal`, `boolean`, `datetime`.
//! - `nil="true"` marks an explicit null regardless of content.
//! - Untyped leaf elements are strings; untyped elements with children are
//!   nested mappings.
//! - Array children use the generic `<item>` element name; on the way back
//!   in, child names are discarded and document order is the only signal.
//! - An *empty* mapping has no wire form of its own: it serializes to an
//!   empty element, which is indistinguishable from an empty string and
//!   parses back as one. Round trips are exact for every other shape.
//!
//! # Key components
//!
//! - [`to_xml`] - render a single-root native map as a wire document
//! - [`from_xml`] - parse a wire document back into a native map

pub mod deserialize;
pub mod serialize;

pub use deserialize::from_xml;
pub use serialize::to_xml;

use std::io;

/// Errors that can occur in the XML codec.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input was not well-formed XML.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// An error from quick-xml attribute handling.
    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// A typed element's text did not match its declared type.
    #[error("failed to parse value: {0}")]
    Parse(String),

    /// The native structure cannot be rendered as a wire document.
    #[error("cannot serialize: {0}")]
    Document(String),
}

impl From<quick_xml::Error> for XmlError {
    fn from(value: quick_xml::Error) -> Self {
        Self::Malformed(value.to_string())
    }
}

/// Converts a native underscore-separated key to a wire element name.
pub(crate) fn dasherize(key: &str) -> String {
    key.replace('_', "-")
}

/// Converts a wire element name back to a native key.
pub(crate) fn underscore(name: &str) -> String {
    name.replace('-', "_")
}

/// Format used for `type="datetime"` content. The gateway transmits UTC
/// timestamps at second precision.
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
