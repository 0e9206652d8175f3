//! XML helpers shared by the document and presentation layers

mod namespace;
mod raw;

pub use namespace::*;
pub use raw::{RawXmlElement, RawXmlNode};

use crate::error::Result;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Get an attribute value by its qualified name
pub fn get_attr(element: &BytesStart, name: &str) -> Option<String> {
    element
        .attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name.as_bytes())
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

/// Get `w:val`, falling back to an unprefixed `val`
pub fn get_w_val(element: &BytesStart) -> Option<String> {
    get_attr(element, "w:val").or_else(|| get_attr(element, "val"))
}

/// OOXML on/off property: a missing `w:val` means on
pub fn parse_bool(element: &BytesStart) -> bool {
    match get_w_val(element) {
        None => true,
        Some(v) => matches!(v.as_str(), "1" | "true" | "on"),
    }
}

/// All attributes of a tag as owned `(name, value)` pairs
pub fn collect_attributes(element: &BytesStart) -> Vec<(String, String)> {
    element
        .attributes()
        .filter_map(|a| a.ok())
        .map(|a| {
            (
                String::from_utf8_lossy(a.key.as_ref()).to_string(),
                String::from_utf8_lossy(&a.value).to_string(),
            )
        })
        .collect()
}

fn tag<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for attr in attrs {
        start.push_attribute(*attr);
    }
    start
}

/// Write `<name attrs.../>`
pub fn write_empty<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<()> {
    writer.write_event(Event::Empty(tag(name, attrs)))?;
    Ok(())
}

/// Write `<name attrs...>`; pair with [`write_end`]
pub fn write_start<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<()> {
    writer.write_event(Event::Start(tag(name, attrs)))?;
    Ok(())
}

pub fn write_end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write `<name>text</name>` with the text escaped
pub fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
