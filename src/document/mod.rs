//! Word-processor document model: body, paragraphs, runs, tables and pictures

mod body;
mod drawing;
mod paragraph;
mod run;
mod styles;
mod table;

pub use body::{BlockContent, Body};
pub use drawing::InlinePicture;
pub use paragraph::{Alignment, Paragraph, ParagraphContent, ParagraphProperties};
pub use run::{BreakType, Run, RunContent, RunProperties};
pub use styles::{default_styles_xml, style_names};
pub use table::{GridColumn, Table, TableCell, TableCellProperties, TableRow};

use crate::error::{Error, Result};
use crate::opc::{rel_types, Package, Part, PartUri, Relationships, MAIN_DOCUMENT, STYLES};
use crate::picture::Picture;
use crate::units::Length;
use crate::xml::{self, RawXmlElement, RawXmlNode};
use log::{debug, warn};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;
use std::path::Path;

const DOCUMENT_URI: &str = "/word/document.xml";
const STYLES_URI: &str = "/word/styles.xml";
const MEDIA_DIR: &str = "/word/media";

/// A DOCX document
#[derive(Debug)]
pub struct Document {
    package: Package,
    body: Body,
    /// Relationships of the main document part (styles, images, ...)
    relationships: Relationships,
}

impl Document {
    /// Create an empty A4 document carrying the default style sheet
    pub fn new() -> Self {
        let mut package = Package::new();
        let mut relationships = Relationships::new();

        match default_styles_part() {
            Ok(part) => {
                package.add_part(part);
                relationships.add(rel_types::STYLES, "styles.xml");
            }
            Err(e) => warn!("new document has no style sheet: {}", e),
        }

        let body = Body {
            section_properties: Some(RawXmlNode::Element(default_section())),
            ..Default::default()
        };

        Self {
            package,
            body,
            relationships,
        }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_package(Package::open(path)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_package(Package::from_bytes(bytes)?)
    }

    fn from_package(package: Package) -> Result<Self> {
        let part = package
            .main_part()
            .ok_or_else(|| Error::MissingPart("main document part".into()))?;
        let body = parse_document_xml(part.data_as_str()?)?;
        let relationships = part.relationships().cloned().unwrap_or_default();
        debug!(
            "opened document with {} blocks and {} relationships",
            body.content.len(),
            relationships.len()
        );

        Ok(Self {
            package,
            body,
            relationships,
        })
    }

    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.update_package()?;
        self.package.save(path)
    }

    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.update_package()?;
        self.package.to_bytes()
    }

    /// Write the body and its relationships back into the package
    fn update_package(&mut self) -> Result<()> {
        let uri = match self.package.main_part() {
            Some(part) => part.uri().clone(),
            None => PartUri::new(DOCUMENT_URI)?,
        };
        let xml = serialize_document_xml(&self.body)?;
        let part = Part::new(uri.clone(), MAIN_DOCUMENT, xml)
            .with_relationships(self.relationships.clone());
        self.package.add_part(part);

        if self.package.main_part().is_none() {
            self.package
                .relationships_mut()
                .add(rel_types::OFFICE_DOCUMENT, uri.zip_name());
        }
        Ok(())
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.paragraphs()
    }

    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.body.paragraphs().nth(index)
    }

    pub fn paragraph_count(&self) -> usize {
        self.body.paragraphs().count()
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.tables()
    }

    pub fn table(&self, index: usize) -> Option<&Table> {
        self.body.tables().nth(index)
    }

    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.body.tables_mut()
    }

    /// Text of all top-level paragraphs, one per line
    pub fn text(&self) -> String {
        self.body
            .paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    /// Relationships of the main document part
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Append a paragraph of `text`
    pub fn add_paragraph(&mut self, text: impl Into<String>) {
        self.body.add_paragraph(Paragraph::new(text));
    }

    /// Append a paragraph of `text` in the given style ID
    pub fn add_styled_paragraph(&mut self, text: impl Into<String>, style: impl Into<String>) {
        self.body.add_paragraph(Paragraph::styled(text, style));
    }

    pub fn add_table(&mut self, table: Table) {
        self.body.add_table(table);
    }

    /// Store `picture` as an image part and return an inline drawing of the given size.
    ///
    /// The drawing still has to be placed in a run.
    pub fn add_picture(
        &mut self,
        picture: &Picture,
        width: Length,
        height: Length,
    ) -> Result<InlinePicture> {
        let format = picture.format();
        let ext = format.extension();

        let mut n = 1 + self
            .package
            .part_uris()
            .filter(|u| u.as_str().starts_with(MEDIA_DIR))
            .count();
        let uri = loop {
            let uri = PartUri::new(&format!("{MEDIA_DIR}/image{n}.{ext}"))?;
            if self.package.part(&uri).is_none() {
                break uri;
            }
            n += 1;
        };

        self.package
            .content_types_mut()
            .add_default(ext, format.mime_type());
        let target = format!("media/{}", uri.file_name());
        self.package
            .add_part(Part::new(uri, format.mime_type(), picture.data().to_vec()));
        let rel_id = self.relationships.add(rel_types::IMAGE, &target);

        let id = self.next_drawing_id();
        debug!("added picture {} as {} ({} x {} EMU)", target, rel_id, width, height);
        Ok(InlinePicture::new(rel_id, width, height, id))
    }

    fn next_drawing_id(&self) -> u32 {
        self.body.pictures().iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    /// Names of every style in the styles part; empty if there is none
    pub fn style_names(&self) -> Result<Vec<String>> {
        let Some(main) = self.package.main_part() else {
            return self.styles_at(&PartUri::new(STYLES_URI)?);
        };
        match self.relationships.by_type(rel_types::STYLES) {
            Some(rel) => self.styles_at(&main.uri().resolve(&rel.target)?),
            None => Ok(Vec::new()),
        }
    }

    fn styles_at(&self, uri: &PartUri) -> Result<Vec<String>> {
        match self.package.part(uri) {
            Some(part) => style_names(part.data_as_str()?),
            None => Ok(Vec::new()),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A4 portrait with 2.54 cm margins
fn default_section() -> RawXmlElement {
    RawXmlElement::new("w:sectPr")
        .with_child(
            RawXmlElement::new("w:pgSz")
                .with_attr("w:w", "11906")
                .with_attr("w:h", "16838"),
        )
        .with_child(
            RawXmlElement::new("w:pgMar")
                .with_attr("w:top", "1440")
                .with_attr("w:right", "1440")
                .with_attr("w:bottom", "1440")
                .with_attr("w:left", "1440")
                .with_attr("w:header", "708")
                .with_attr("w:footer", "708")
                .with_attr("w:gutter", "0"),
        )
}

/// Parse document.xml content
fn parse_document_xml(xml: &str) -> Result<Body> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut body = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().local_name().as_ref() {
                b"body" => body = Some(Body::from_reader(&mut reader)?),
                b"document" => {}
                // e.g. w:background; not modelled
                _ => {
                    RawXmlElement::from_reader(&mut reader, &e)?;
                }
            },
            Event::Empty(e) if e.name().local_name().as_ref() == b"body" => {
                body = Some(Body::default());
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    body.ok_or_else(|| Error::InvalidDocument("missing w:body element".into()))
}

/// Serialize the body to document.xml content
fn serialize_document_xml(body: &Body) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut start = BytesStart::new("w:document");
    for (attr, value) in xml::document_namespaces() {
        start.push_attribute((attr, value));
    }
    writer.write_event(Event::Start(start))?;
    body.write_to(&mut writer)?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;

    Ok(writer.into_inner().into_inner())
}

fn default_styles_part() -> Result<Part> {
    Ok(Part::new(PartUri::new(STYLES_URI)?, STYLES, default_styles_xml()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SIMPLE_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p>
      <w:r>
        <w:t>Pets per household</w:t>
      </w:r>
    </w:p>
    <w:p>
      <w:pPr>
        <w:pStyle w:val="Heading1"/>
        <w:jc w:val="center"/>
      </w:pPr>
      <w:r>
        <w:rPr>
          <w:b/>
        </w:rPr>
        <w:t>Survey results</w:t>
      </w:r>
    </w:p>
    <w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr>
  </w:body>
</w:document>"#;

    #[test]
    fn test_parse_simple_document() {
        let body = parse_document_xml(SIMPLE_DOC).unwrap();

        let paras: Vec<_> = body.paragraphs().collect();
        assert_eq!(paras.len(), 2);
        assert_eq!(paras[0].text(), "Pets per household");
        assert_eq!(paras[1].text(), "Survey results");
        assert_eq!(paras[1].style(), Some("Heading1"));
        assert_eq!(paras[1].alignment(), Some(Alignment::Center));
        assert!(paras[1].runs().next().unwrap().bold());
        assert!(body.section_properties.is_some());
    }

    #[test]
    fn test_missing_body_is_an_error() {
        let err = parse_document_xml("<w:document/>").unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
    }

    #[test]
    fn test_new_document_carries_style_sheet() {
        let part = default_styles_part().unwrap();
        assert_eq!(part.uri().as_str(), STYLES_URI);

        let doc = Document::new();
        let uri = PartUri::new(STYLES_URI).unwrap();
        assert_eq!(doc.package().part(&uri).unwrap().content_type(), STYLES);
        let rel = doc.relationships().by_type(rel_types::STYLES).unwrap();
        assert_eq!(rel.target, "styles.xml");
        let names = doc.style_names().unwrap();
        for name in ["Normal", "Footer", "Normal Table"] {
            assert!(names.iter().any(|n| n == name), "{name}");
        }
    }

    #[test]
    fn test_new_document_round_trip() {
        let mut doc = Document::new();
        doc.add_styled_paragraph("Hello", "Heading1");
        let bytes = doc.to_bytes().unwrap();

        let reopened = Document::from_bytes(&bytes).unwrap();
        assert_eq!(reopened.text(), "Hello");
        assert_eq!(reopened.paragraph(0).unwrap().style(), Some("Heading1"));
        assert!(reopened.body().section_properties.is_some());
        assert!(reopened.style_names().unwrap().contains(&"Normal Table".to_string()));
        assert!(reopened.relationships().by_type(rel_types::STYLES).is_some());
    }

    #[test]
    fn test_pictures_get_distinct_parts_and_ids() {
        let png = crate::picture::tests::png(4, 2);
        let picture = Picture::from_bytes(png).unwrap();
        let mut doc = Document::new();

        let first = doc.add_picture(&picture, Length::cm(2.0), Length::cm(1.0)).unwrap();
        let mut para = Paragraph::default();
        para.add_run(Run::picture(first.clone()));
        doc.body_mut().add_paragraph(para);
        let second = doc.add_picture(&picture, Length::cm(2.0), Length::cm(1.0)).unwrap();

        assert_ne!(first.rel_id, second.rel_id);
        assert_eq!((first.id, second.id), (1, 2));
        let targets: Vec<_> = doc
            .relationships()
            .all_by_type(rel_types::IMAGE)
            .map(|r| r.target.clone())
            .collect();
        assert_eq!(targets, vec!["media/image1.png", "media/image2.png"]);
    }
}
