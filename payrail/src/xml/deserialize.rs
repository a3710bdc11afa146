//! XML deserialization: parsing a wire document into a native value tree.
//!
//! The `type` attribute on each element drives coercion of leaf text; an
//! element with child elements and no type attribute becomes a nested
//! mapping, and any text alongside those children is formatting whitespace
//! and is discarded. Leaf text is taken verbatim, with entity and character
//! references resolved.
//!
//! Duplicate sibling element names under the same parent follow a
//! **last-wins** policy: the later element replaces the earlier one in the
//! resulting mapping. Repeated values the gateway actually sends always
//! arrive inside a `type="array"` element, where order is preserved.

use chrono::NaiveDateTime;
use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, Event};
use rust_decimal::Decimal;

use crate::value::{Map, Value};
use crate::xml::{DATETIME_FORMAT, XmlError, underscore};

/// Parses a complete wire document into a single-entry native map keyed by
/// the root element's (underscored) name.
///
/// # Errors
///
/// Returns [`XmlError::Malformed`] if the input is not well-formed XML, or
/// [`XmlError::Parse`] if a typed element's text does not match its declared
/// type.
pub fn from_xml(xml: &[u8]) -> Result<Value, XmlError> {
    // The reader must not trim text: escapes split leaf content into
    // fragments whose edge whitespace is significant. Formatting whitespace
    // only occurs next to child elements, where `classify` discards text.
    let mut reader = Reader::from_reader(xml);

    // Skip the declaration, comments, and formatting text before the root.
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let key = element_key(&e)?;
                let attrs = TypeAttrs::of(&e)?;
                let value = parse_element(&mut reader, &attrs)?;
                let mut map = Map::new();
                map.insert(key, value);
                return Ok(Value::Map(map));
            }
            Event::Empty(e) => {
                let key = element_key(&e)?;
                let attrs = TypeAttrs::of(&e)?;
                let value = classify(&attrs, String::new(), Vec::new())?;
                let mut map = Map::new();
                map.insert(key, value);
                return Ok(Value::Map(map));
            }
            Event::Eof => {
                return Err(XmlError::Malformed("document has no root element".to_owned()));
            }
            _ => {}
        }
    }
}

/// The wire attributes that govern interpretation of an element.
struct TypeAttrs {
    kind: Option<String>,
    nil: bool,
}

impl TypeAttrs {
    fn of(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let mut kind = None;
        let mut nil = false;
        for attr in start.attributes() {
            let attr = attr?;
            match attr.key.as_ref() {
                b"type" => kind = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                b"nil" => nil = attr.value.as_ref() == b"true",
                _ => {}
            }
        }
        Ok(Self { kind, nil })
    }
}

/// Reads the content of the current element and classifies it.
///
/// The reader is positioned just after the element's start tag; all child
/// content is consumed through the matching end tag.
fn parse_element(reader: &mut Reader<&[u8]>, attrs: &TypeAttrs) -> Result<Value, XmlError> {
    let mut text = String::new();
    let mut children: Vec<(String, Value)> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let key = element_key(&e)?;
                let child_attrs = TypeAttrs::of(&e)?;
                children.push((key, parse_element(reader, &child_attrs)?));
            }
            Event::Empty(e) => {
                let key = element_key(&e)?;
                let child_attrs = TypeAttrs::of(&e)?;
                children.push((key, classify(&child_attrs, String::new(), Vec::new())?));
            }
            Event::Text(t) => {
                let decoded = t
                    .decode()
                    .map_err(|e| XmlError::Malformed(e.to_string()))?;
                text.push_str(&decoded);
            }
            // Entity and character references arrive as their own events,
            // with the surrounding text fragments split off untrimmed.
            Event::GeneralRef(r) => text.push(resolve_reference(&r)?),
            Event::End(_) => break,
            Event::Eof => {
                return Err(XmlError::Malformed(
                    "unexpected end of input inside element".to_owned(),
                ));
            }
            _ => {}
        }
    }

    classify(attrs, text, children)
}

/// Turns an element's attributes, text, and children into a native value.
fn classify(
    attrs: &TypeAttrs,
    text: String,
    children: Vec<(String, Value)>,
) -> Result<Value, XmlError> {
    // The nil marker wins over any text or type attribute.
    if attrs.nil {
        return Ok(Value::Nil);
    }

    match attrs.kind.as_deref() {
        Some("array") => Ok(Value::List(
            children.into_iter().map(|(_, value)| value).collect(),
        )),
        Some("integer") => text
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| XmlError::Parse(format!("invalid integer {text:?}: {e}"))),
        Some("bigdecimal") => Decimal::from_str_exact(text.trim())
            .map(Value::Decimal)
            .map_err(|e| XmlError::Parse(format!("invalid decimal {text:?}: {e}"))),
        Some("boolean") => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(XmlError::Parse(format!("invalid boolean {text:?}"))),
        },
        Some("datetime") => NaiveDateTime::parse_from_str(text.trim(), DATETIME_FORMAT)
            .map(|naive| Value::Timestamp(naive.and_utc()))
            .map_err(|e| XmlError::Parse(format!("invalid datetime {text:?}: {e}"))),
        // Unrecognized type attributes fall back to the untyped rules so new
        // server-side hints never break older clients.
        Some(_) | None => {
            if children.is_empty() {
                Ok(Value::Str(text))
            } else {
                let mut map = Map::new();
                for (key, value) in children {
                    map.insert(key, value);
                }
                Ok(Value::Map(map))
            }
        }
    }
}

/// Resolves one reference event: numeric character references plus the five
/// predefined XML entities. Documents never declare custom entities.
fn resolve_reference(r: &BytesRef<'_>) -> Result<char, XmlError> {
    if let Some(ch) = r
        .resolve_char_ref()
        .map_err(|e| XmlError::Malformed(e.to_string()))?
    {
        return Ok(ch);
    }
    let name = r.decode().map_err(|e| XmlError::Malformed(e.to_string()))?;
    match name.as_ref() {
        "lt" => Ok('<'),
        "gt" => Ok('>'),
        "amp" => Ok('&'),
        "apos" => Ok('\''),
        "quot" => Ok('"'),
        other => Err(XmlError::Malformed(format!("unknown entity `&{other};`"))),
    }
}

fn element_key(start: &BytesStart<'_>) -> Result<String, XmlError> {
    let name = start.name();
    let raw = std::str::from_utf8(name.as_ref())
        .map_err(|e| XmlError::Malformed(e.to_string()))?;
    Ok(underscore(raw))
}
