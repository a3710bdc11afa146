//! Parameter key allow-lists, checked before any network I/O.
//!
//! Each mutating operation declares a [`Signature`]: the ordered set of
//! parameter keys it accepts, with nested signatures for sub-maps.
//! Validation is purely structural (key presence at each nesting level);
//! value types are the serializer's concern.

use std::fmt;

use crate::value::{Map, Value};

/// One permitted entry at a nesting level.
#[derive(Debug, Clone)]
enum Entry {
    /// A flat key; any value shape is permitted under it.
    Key(&'static str),
    /// A key whose map value is validated against its own signature.
    Group(&'static str, Signature),
}

/// The allow-list of parameter keys an operation accepts.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    entries: Vec<Entry>,
}

impl Signature {
    /// Creates an empty signature.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Permits a flat key.
    #[must_use]
    pub fn key(mut self, name: &'static str) -> Self {
        self.entries.push(Entry::Key(name));
        self
    }

    /// Permits a key whose map value is checked against `signature`.
    #[must_use]
    pub fn group(mut self, name: &'static str, signature: Self) -> Self {
        self.entries.push(Entry::Group(name, signature));
        self
    }

    fn lookup(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| match entry {
            Entry::Key(key) | Entry::Group(key, _) => *key == name,
        })
    }
}

/// Parameter keys that are not part of an operation's signature.
///
/// Carries *every* offending key, so the caller sees the complete list in
/// one pass instead of fixing them one at a time. Nested offenders are
/// reported as dotted paths (`options.bogus`).
#[derive(Debug, Clone)]
pub struct InvalidKeysError {
    keys: Vec<String>,
}

impl InvalidKeysError {
    /// The offending keys, in map order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

impl fmt::Display for InvalidKeysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid keys: {}", self.keys.join(", "))
    }
}

impl std::error::Error for InvalidKeysError {}

/// Verifies every key in `params` against the operation's signature.
///
/// # Errors
///
/// Returns [`InvalidKeysError`] listing all keys not permitted at their
/// nesting level. No network call happens when this fails: callers check
/// signatures before handing parameters to the transport.
pub fn verify_keys(params: &Map, signature: &Signature) -> Result<(), InvalidKeysError> {
    let mut offenders = Vec::new();
    collect_invalid(params, signature, "", &mut offenders);
    if offenders.is_empty() {
        Ok(())
    } else {
        Err(InvalidKeysError { keys: offenders })
    }
}

fn collect_invalid(params: &Map, signature: &Signature, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in params {
        match signature.lookup(key) {
            None => out.push(path(prefix, key)),
            Some(Entry::Group(_, nested)) => {
                if let Value::Map(inner) = value {
                    collect_invalid(inner, nested, &path(prefix, key), out);
                }
            }
            Some(Entry::Key(_)) => {}
        }
    }
}

fn path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}
