//! Inline pictures (w:drawing/wp:inline)

use crate::error::Result;
use crate::units::Length;
use crate::xml::{self, RawXmlElement};
use quick_xml::Writer;

const PICTURE_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

/// A picture placed inline with the text of a run
#[derive(Clone, Debug, PartialEq)]
pub struct InlinePicture {
    /// Relationship ID of the image part
    pub rel_id: String,
    pub width: Length,
    pub height: Length,
    /// Document-unique drawing ID (`wp:docPr/@id`)
    pub id: u32,
    pub name: String,
}

impl InlinePicture {
    pub fn new(rel_id: impl Into<String>, width: Length, height: Length, id: u32) -> Self {
        Self {
            rel_id: rel_id.into(),
            width,
            height,
            id,
            name: format!("Picture {id}"),
        }
    }

    /// Recognise an inline picture in a preserved `w:drawing` subtree.
    ///
    /// Anchored (floating) drawings and non-picture graphics return `None`.
    pub fn from_drawing(drawing: &RawXmlElement) -> Option<Self> {
        let inline = drawing.child("wp:inline")?;
        let extent = inline.child("wp:extent")?;
        let doc_pr = inline.child("wp:docPr")?;
        let blip = inline
            .child("a:graphic")?
            .child("a:graphicData")?
            .child("pic:pic")?
            .child("pic:blipFill")?
            .child("a:blip")?;

        Some(Self {
            rel_id: blip.attr("r:embed")?.to_string(),
            width: Length::emu(extent.attr("cx")?.parse().ok()?),
            height: Length::emu(extent.attr("cy")?.parse().ok()?),
            id: doc_pr.attr("id")?.parse().ok()?,
            name: doc_pr.attr("name").unwrap_or_default().to_string(),
        })
    }

    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let (cx, cy) = (self.width.as_emu().to_string(), self.height.as_emu().to_string());
        let (cx, cy) = (cx.as_str(), cy.as_str());
        let id = self.id.to_string();
        let name = self.name.as_str();

        xml::write_start(writer, "w:drawing", &[])?;
        xml::write_start(
            writer,
            "wp:inline",
            &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
        )?;
        xml::write_empty(writer, "wp:extent", &[("cx", cx), ("cy", cy)])?;
        xml::write_empty(
            writer,
            "wp:effectExtent",
            &[("l", "0"), ("t", "0"), ("r", "0"), ("b", "0")],
        )?;
        xml::write_empty(writer, "wp:docPr", &[("id", id.as_str()), ("name", name)])?;
        xml::write_start(writer, "wp:cNvGraphicFramePr", &[])?;
        xml::write_empty(writer, "a:graphicFrameLocks", &[("noChangeAspect", "1")])?;
        xml::write_end(writer, "wp:cNvGraphicFramePr")?;

        xml::write_start(writer, "a:graphic", &[])?;
        xml::write_start(writer, "a:graphicData", &[("uri", PICTURE_URI)])?;
        xml::write_start(writer, "pic:pic", &[])?;

        xml::write_start(writer, "pic:nvPicPr", &[])?;
        xml::write_empty(writer, "pic:cNvPr", &[("id", "0"), ("name", name)])?;
        xml::write_empty(writer, "pic:cNvPicPr", &[])?;
        xml::write_end(writer, "pic:nvPicPr")?;

        xml::write_start(writer, "pic:blipFill", &[])?;
        xml::write_empty(writer, "a:blip", &[("r:embed", self.rel_id.as_str())])?;
        xml::write_start(writer, "a:stretch", &[])?;
        xml::write_empty(writer, "a:fillRect", &[])?;
        xml::write_end(writer, "a:stretch")?;
        xml::write_end(writer, "pic:blipFill")?;

        xml::write_start(writer, "pic:spPr", &[])?;
        xml::write_start(writer, "a:xfrm", &[])?;
        xml::write_empty(writer, "a:off", &[("x", "0"), ("y", "0")])?;
        xml::write_empty(writer, "a:ext", &[("cx", cx), ("cy", cy)])?;
        xml::write_end(writer, "a:xfrm")?;
        xml::write_start(writer, "a:prstGeom", &[("prst", "rect")])?;
        xml::write_empty(writer, "a:avLst", &[])?;
        xml::write_end(writer, "a:prstGeom")?;
        xml::write_end(writer, "pic:spPr")?;

        xml::write_end(writer, "pic:pic")?;
        xml::write_end(writer, "a:graphicData")?;
        xml::write_end(writer, "a:graphic")?;
        xml::write_end(writer, "wp:inline")?;
        xml::write_end(writer, "w:drawing")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    fn reparse(xml: &str) -> RawXmlElement {
        let mut reader = Reader::from_str(xml);
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => {
                    let e = e.into_owned();
                    return RawXmlElement::from_reader(&mut reader, &e).unwrap();
                }
                Event::Eof => panic!("no element"),
                _ => {}
            }
        }
    }

    #[test]
    fn test_written_picture_is_recognised() {
        let pic = InlinePicture::new("rId7", Length::cm(15.2), Length::cm(7.6), 3);
        let mut writer = Writer::new(Vec::new());
        pic.write_to(&mut writer).unwrap();
        let xml = String::from_utf8(writer.into_inner()).unwrap();

        assert!(xml.contains(r#"<a:blip r:embed="rId7"/>"#));
        assert!(xml.contains(r#"<wp:extent cx="5472000" cy="2736000"/>"#));
        assert_eq!(InlinePicture::from_drawing(&reparse(&xml)), Some(pic));
    }

    #[test]
    fn test_anchored_drawing_is_not_inline() {
        let drawing = reparse(r#"<w:drawing><wp:anchor><wp:extent cx="1" cy="1"/></wp:anchor></w:drawing>"#);
        assert_eq!(InlinePicture::from_drawing(&drawing), None);
    }
}
