//! `[Content_Types].xml`

use crate::error::{Error, Result};
use crate::opc::PartUri;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::BTreeMap;
use std::io::Write;

/// Extension defaults and per-part overrides of a package
#[derive(Clone, Debug, Default)]
pub struct ContentTypes {
    defaults: BTreeMap<String, String>,
    overrides: BTreeMap<PartUri, String>,
}

impl ContentTypes {
    /// Content types with the defaults every generated package needs
    pub fn new() -> Self {
        let mut ct = Self::default();
        ct.add_default("rels", RELATIONSHIPS);
        ct.add_default("xml", XML);
        ct
    }

    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut ct = Self::default();
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) => match e.name().local_name().as_ref() {
                    b"Default" => {
                        let ext = required_attr(&e, "Extension")?;
                        let content_type = required_attr(&e, "ContentType")?;
                        ct.defaults.insert(ext.to_lowercase(), content_type);
                    }
                    b"Override" => {
                        let uri = PartUri::new(&required_attr(&e, "PartName")?)?;
                        let content_type = required_attr(&e, "ContentType")?;
                        ct.overrides.insert(uri, content_type);
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(ct)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut xml = Writer::new(writer);
        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        let mut types = BytesStart::new("Types");
        types.push_attribute(("xmlns", NS_CONTENT_TYPES));
        xml.write_event(Event::Start(types))?;

        for (ext, content_type) in &self.defaults {
            let mut elem = BytesStart::new("Default");
            elem.push_attribute(("Extension", ext.as_str()));
            elem.push_attribute(("ContentType", content_type.as_str()));
            xml.write_event(Event::Empty(elem))?;
        }
        for (uri, content_type) in &self.overrides {
            let mut elem = BytesStart::new("Override");
            elem.push_attribute(("PartName", uri.as_str()));
            elem.push_attribute(("ContentType", content_type.as_str()));
            xml.write_event(Event::Empty(elem))?;
        }

        xml.write_event(Event::End(BytesEnd::new("Types")))?;
        Ok(())
    }

    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults.insert(extension.to_lowercase(), content_type.to_string());
    }

    pub fn add_override(&mut self, uri: &PartUri, content_type: &str) {
        self.overrides.insert(uri.clone(), content_type.to_string());
    }

    pub fn remove_override(&mut self, uri: &PartUri) -> Option<String> {
        self.overrides.remove(uri)
    }

    /// Override first, then the extension default
    pub fn get(&self, uri: &PartUri) -> Option<&str> {
        if let Some(ct) = self.overrides.get(uri) {
            return Some(ct);
        }
        let ext = uri.extension()?.to_lowercase();
        self.defaults.get(&ext).map(String::as_str)
    }
}

fn required_attr(element: &BytesStart, name: &str) -> Result<String> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            return Ok(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    Err(Error::MissingAttribute {
        element: String::from_utf8_lossy(element.name().as_ref()).to_string(),
        attr: name.to_string(),
    })
}

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub const XML: &str = "application/xml";

pub const MAIN_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
pub const STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";

pub const PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
pub const SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
pub const SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
pub const SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
pub const THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
pub const TABLE_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_types() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="RELS" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="png" ContentType="image/png"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#;

        let ct = ContentTypes::from_xml(xml).unwrap();

        let pres = PartUri::new("/ppt/presentation.xml").unwrap();
        assert_eq!(ct.get(&pres), Some(PRESENTATION));
        let rels = PartUri::new("/_rels/.rels").unwrap();
        assert_eq!(ct.get(&rels), Some(RELATIONSHIPS));
        let image = PartUri::new("/ppt/media/image1.PNG").unwrap();
        assert_eq!(ct.get(&image), Some("image/png"));
    }

    #[test]
    fn test_missing_attribute() {
        let xml = r#"<Types><Default Extension="xml"/></Types>"#;
        assert!(matches!(
            ContentTypes::from_xml(xml),
            Err(Error::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_written_output_reparses() {
        let mut ct = ContentTypes::new();
        let slide = PartUri::new("/ppt/slides/slide1.xml").unwrap();
        ct.add_override(&slide, SLIDE);
        ct.add_default("jpeg", "image/jpeg");

        let mut buf = Vec::new();
        ct.write_to(&mut buf).unwrap();
        let ct2 = ContentTypes::from_xml(std::str::from_utf8(&buf).unwrap()).unwrap();

        assert_eq!(ct2.get(&slide), Some(SLIDE));
        assert_eq!(ct2.get(&PartUri::new("/a.jpeg").unwrap()), Some("image/jpeg"));

        ct.remove_override(&slide);
        assert_eq!(ct.get(&slide), Some(XML));
    }
}
