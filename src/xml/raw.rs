//! Raw XML nodes, kept verbatim so unknown markup survives a load/save cycle

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

use super::collect_attributes;
use crate::error::{Error, Result};

/// A preserved XML node
#[derive(Clone, Debug)]
pub enum RawXmlNode {
    Element(RawXmlElement),
    Text(String),
    Comment(String),
}

/// A preserved XML element with its full subtree
#[derive(Clone, Debug)]
pub struct RawXmlElement {
    /// Qualified name, e.g. `w:tblPr`
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<RawXmlNode>,
    /// Written back as `<x/>` when it has no children
    pub self_closing: bool,
}

impl RawXmlElement {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: true,
        }
    }

    /// Read the subtree of `start`, whose start tag has just been consumed
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
        let mut children = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    children.push(RawXmlNode::Element(Self::from_reader(reader, &e)?));
                }
                Event::Empty(e) => {
                    children.push(RawXmlNode::Element(Self::from_empty(&e)));
                }
                Event::Text(t) => {
                    let text = t.unescape()?.to_string();
                    if !text.is_empty() {
                        children.push(RawXmlNode::Text(text));
                    }
                }
                Event::Comment(c) => {
                    children.push(RawXmlNode::Comment(String::from_utf8_lossy(&c).to_string()));
                }
                Event::End(e) if e.name().as_ref() == name.as_bytes() => break,
                Event::Eof => {
                    return Err(Error::InvalidDocument(format!("unexpected EOF inside <{name}>")))
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(Self {
            name,
            attributes: collect_attributes(start),
            children,
            self_closing: false,
        })
    }

    /// Build from a self-closing tag
    pub fn from_empty(e: &BytesStart) -> Self {
        Self {
            name: String::from_utf8_lossy(e.name().as_ref()).to_string(),
            attributes: collect_attributes(e),
            children: Vec::new(),
            self_closing: true,
        }
    }

    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() && self.self_closing {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: RawXmlElement) -> Self {
        self.children.push(RawXmlNode::Element(child));
        self.self_closing = false;
        self
    }

    /// First attribute value with the given qualified name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child element with the given qualified name
    pub fn child(&self, name: &str) -> Option<&RawXmlElement> {
        self.children.iter().find_map(|c| match c {
            RawXmlNode::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// Remove every direct child element with the given qualified name
    pub fn remove_children(&mut self, name: &str) {
        self.children
            .retain(|c| !matches!(c, RawXmlNode::Element(e) if e.name == name));
    }
}

impl RawXmlNode {
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        match self {
            RawXmlNode::Element(e) => e.write_to(writer)?,
            RawXmlNode::Text(t) => writer.write_event(Event::Text(BytesText::new(t)))?,
            RawXmlNode::Comment(c) => writer.write_event(Event::Comment(BytesText::new(c)))?,
        }
        Ok(())
    }

    /// The element, if this node is one
    pub fn as_element(&self) -> Option<&RawXmlElement> {
        match self {
            RawXmlNode::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut RawXmlElement> {
        match self {
            RawXmlNode::Element(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(xml: &str) -> RawXmlElement {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf).unwrap() {
                Event::Start(e) => return RawXmlElement::from_reader(&mut reader, &e).unwrap(),
                Event::Eof => panic!("no element"),
                _ => {}
            }
        }
    }

    fn serialize(elem: &RawXmlElement) -> String {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        elem.write_to(&mut writer).unwrap();
        String::from_utf8(writer.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn test_subtree_is_preserved() {
        let elem = parse(r#"<w:custom foo="bar"><w:child>text</w:child><w:leaf/></w:custom>"#);

        assert_eq!(elem.name, "w:custom");
        assert_eq!(elem.attr("foo"), Some("bar"));
        assert_eq!(elem.children.len(), 2);
        assert!(elem.child("w:leaf").unwrap().self_closing);
        assert_eq!(
            serialize(&elem),
            r#"<w:custom foo="bar"><w:child>text</w:child><w:leaf/></w:custom>"#
        );
    }

    #[test]
    fn test_builder_and_remove_children() {
        let mut elem = RawXmlElement::new("w:tblPr")
            .with_child(RawXmlElement::new("w:tblStyle").with_attr("w:val", "TableGrid"))
            .with_child(RawXmlElement::new("w:tblW"));
        elem.remove_children("w:tblStyle");

        assert!(elem.child("w:tblStyle").is_none());
        assert_eq!(serialize(&elem), "<w:tblPr><w:tblW/></w:tblPr>");
    }

    #[test]
    fn test_eof_inside_element_is_an_error() {
        let mut reader = Reader::from_str("<w:open><w:child/>");
        let mut buf = Vec::new();
        let start = match reader.read_event_into(&mut buf).unwrap() {
            Event::Start(e) => e.into_owned(),
            other => panic!("unexpected {other:?}"),
        };
        assert!(RawXmlElement::from_reader(&mut reader, &start).is_err());
    }
}
