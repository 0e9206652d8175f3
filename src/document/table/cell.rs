//! Table cell (w:tc, w:tcPr)

use crate::document::{Alignment, Paragraph};
use crate::error::Result;
use crate::xml::{get_attr, RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

/// Table cell (w:tc)
#[derive(Clone, Debug, Default)]
pub struct TableCell {
    pub properties: Option<TableCellProperties>,
    pub paragraphs: Vec<Paragraph>,
    pub unknown_children: Vec<RawXmlNode>,
}

/// Table cell properties (w:tcPr)
#[derive(Clone, Debug, Default)]
pub struct TableCellProperties {
    /// Width in twips
    pub width: Option<i64>,
    pub unknown_children: Vec<RawXmlNode>,
}

impl TableCell {
    /// A cell holding one paragraph of `text`
    pub fn new(text: impl Into<String>) -> Self {
        TableCell {
            paragraphs: vec![Paragraph::new(text)],
            ..Default::default()
        }
    }

    /// Replace the content with a single paragraph of `text`
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.paragraphs.clear();
        self.paragraphs.push(Paragraph::new(text));
    }

    /// Replace the content with `text`, aligned
    pub fn set_aligned_text(&mut self, text: impl Into<String>, alignment: Alignment) {
        self.set_text(text);
        self.first_paragraph_mut().set_alignment(alignment);
    }

    /// The first paragraph, created if the cell has none (a cell must hold at least one)
    pub fn first_paragraph_mut(&mut self) -> &mut Paragraph {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph::default());
        }
        &mut self.paragraphs[0]
    }

    pub fn add_paragraph(&mut self, para: Paragraph) {
        self.paragraphs.push(para);
    }

    /// Paragraph texts joined by newlines
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs.iter()
    }

    /// Width in twips
    pub fn width(&self) -> Option<i64> {
        self.properties.as_ref()?.width
    }

    pub fn set_width(&mut self, twips: i64) {
        self.properties.get_or_insert_with(Default::default).width = Some(twips);
    }

    /// Parse from reader (after w:tc start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, _start: &BytesStart) -> Result<Self> {
        let mut cell = TableCell::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"tcPr" => {
                        cell.properties = Some(TableCellProperties::from_reader(reader)?);
                    }
                    b"p" => cell.paragraphs.push(Paragraph::from_reader(reader, &e)?),
                    _ => {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        cell.unknown_children.push(RawXmlNode::Element(raw));
                    }
                },
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"p" => cell.paragraphs.push(Paragraph::from_empty(&e)),
                    _ => {
                        let raw = RawXmlElement::from_empty(&e);
                        cell.unknown_children.push(RawXmlNode::Element(raw));
                    }
                },
                Event::End(e) if e.name().local_name().as_ref() == b"tc" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(cell)
    }

    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:tc")))?;

        if let Some(props) = &self.properties {
            props.write_to(writer)?;
        }

        if self.paragraphs.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new("w:p")))?;
        }
        for para in &self.paragraphs {
            para.write_to(writer)?;
        }

        for child in &self.unknown_children {
            child.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:tc")))?;
        Ok(())
    }
}

impl TableCellProperties {
    /// Parse from reader (after w:tcPr start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut props = TableCellProperties::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let raw = RawXmlElement::from_reader(reader, &e)?;
                    props.unknown_children.push(RawXmlNode::Element(raw));
                }
                Event::Empty(e) if e.name().local_name().as_ref() == b"tcW" => {
                    props.width = get_attr(&e, "w:w").and_then(|v| v.parse().ok());
                }
                Event::Empty(e) => {
                    props
                        .unknown_children
                        .push(RawXmlNode::Element(RawXmlElement::from_empty(&e)));
                }
                Event::End(e) if e.name().local_name().as_ref() == b"tcPr" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(props)
    }

    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        if self.width.is_none() && self.unknown_children.is_empty() {
            return Ok(());
        }

        writer.write_event(Event::Start(BytesStart::new("w:tcPr")))?;

        if let Some(width) = self.width {
            let mut elem = BytesStart::new("w:tcW");
            elem.push_attribute(("w:w", width.to_string().as_str()));
            elem.push_attribute(("w:type", "dxa"));
            writer.write_event(Event::Empty(elem))?;
        }

        for child in &self.unknown_children {
            child.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:tcPr")))?;
        Ok(())
    }
}
