//! XML serialization: rendering a native value tree as a wire document.
//!
//! Serialization is pure and deterministic: [`crate::value::Map`] keeps keys
//! ordered, so serializing the same structure twice produces byte-identical
//! output.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use crate::value::Value;
use crate::xml::{DATETIME_FORMAT, XmlError, dasherize};

/// Renders a native map as a complete wire document.
///
/// The map must contain exactly one entry; that entry becomes the document
/// root (callers wrap request parameters as `{"subscription": {...}}`).
/// Produces an XML declaration followed by the root element.
///
/// # Errors
///
/// Returns [`XmlError::Document`] if the input is not a single-entry map,
/// or [`XmlError::Io`] if writing fails.
pub fn to_xml(doc: &Value) -> Result<Vec<u8>, XmlError> {
    let map = doc
        .as_map()
        .ok_or_else(|| XmlError::Document("document root must be a mapping".to_owned()))?;
    if map.len() != 1 {
        return Err(XmlError::Document(format!(
            "document root must have exactly one key, got {}",
            map.len()
        )));
    }

    let mut buf = Vec::with_capacity(256);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    for (key, value) in map {
        write_value(&mut writer, key, value)?;
    }

    Ok(buf)
}

/// Writes one `<key>value</key>` element, recursing into maps and lists.
fn write_value<W: Write>(writer: &mut Writer<W>, key: &str, value: &Value) -> io::Result<()> {
    let name = dasherize(key);
    match value {
        Value::Nil => {
            writer
                .create_element(name.as_str())
                .with_attribute(("nil", "true"))
                .write_empty()?;
        }
        Value::Bool(b) => {
            writer
                .create_element(name.as_str())
                .with_attribute(("type", "boolean"))
                .write_text_content(BytesText::new(if *b { "true" } else { "false" }))?;
        }
        Value::Int(n) => {
            writer
                .create_element(name.as_str())
                .with_attribute(("type", "integer"))
                .write_text_content(BytesText::new(&n.to_string()))?;
        }
        Value::Decimal(d) => {
            writer
                .create_element(name.as_str())
                .with_attribute(("type", "bigdecimal"))
                .write_text_content(BytesText::new(&d.to_string()))?;
        }
        Value::Timestamp(ts) => {
            writer
                .create_element(name.as_str())
                .with_attribute(("type", "datetime"))
                .write_text_content(BytesText::new(&ts.format(DATETIME_FORMAT).to_string()))?;
        }
        Value::Str(s) => {
            writer
                .create_element(name.as_str())
                .write_text_content(BytesText::new(s))?;
        }
        Value::Map(map) => {
            if map.is_empty() {
                // Same wire form as the empty string; see the module docs.
                writer.create_element(name.as_str()).write_empty()?;
            } else {
                writer
                    .create_element(name.as_str())
                    .write_inner_content(|w| {
                        for (k, v) in map {
                            write_value(w, k, v)?;
                        }
                        Ok(())
                    })?;
            }
        }
        Value::List(items) => {
            let element = writer
                .create_element(name.as_str())
                .with_attribute(("type", "array"));
            if items.is_empty() {
                element.write_empty()?;
            } else {
                element.write_inner_content(|w| {
                    for item in items {
                        write_value(w, "item", item)?;
                    }
                    Ok(())
                })?;
            }
        }
    }
    Ok(())
}
