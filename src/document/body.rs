//! Document body and block-level content

use crate::document::{InlinePicture, Paragraph, Table};
use crate::error::Result;
use crate::xml::{RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

/// Block-level content in a document body
#[derive(Clone, Debug)]
pub enum BlockContent {
    Paragraph(Paragraph),
    Table(Table),
    /// Anything else, preserved for round-trip
    Unknown(RawXmlNode),
}

/// Document body (w:body)
#[derive(Clone, Debug, Default)]
pub struct Body {
    pub content: Vec<BlockContent>,
    /// Trailing section properties, always written last
    pub section_properties: Option<RawXmlNode>,
}

impl Body {
    /// Parse from reader (after w:body start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut body = Body::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"p" => {
                        let para = Paragraph::from_reader(reader, &e)?;
                        body.content.push(BlockContent::Paragraph(para));
                    }
                    b"tbl" => {
                        let table = Table::from_reader(reader, &e)?;
                        body.content.push(BlockContent::Table(table));
                    }
                    b"sectPr" => {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        body.section_properties = Some(RawXmlNode::Element(raw));
                    }
                    _ => {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        body.content.push(BlockContent::Unknown(RawXmlNode::Element(raw)));
                    }
                },
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"p" => {
                        let para = Paragraph::from_empty(&e);
                        body.content.push(BlockContent::Paragraph(para));
                    }
                    b"sectPr" => {
                        let raw = RawXmlElement::from_empty(&e);
                        body.section_properties = Some(RawXmlNode::Element(raw));
                    }
                    _ => {
                        let raw = RawXmlElement::from_empty(&e);
                        body.content.push(BlockContent::Unknown(RawXmlNode::Element(raw)));
                    }
                },
                Event::End(e) if e.name().local_name().as_ref() == b"body" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(body)
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.content.iter().filter_map(|c| match c {
            BlockContent::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.content.iter().filter_map(|c| match c {
            BlockContent::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.content.iter_mut().filter_map(|c| match c {
            BlockContent::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Every inline picture, including those inside table cells
    pub fn pictures(&self) -> Vec<&InlinePicture> {
        let mut found = Vec::new();
        for block in &self.content {
            match block {
                BlockContent::Paragraph(p) => collect_pictures(p, &mut found),
                BlockContent::Table(t) => {
                    for cell in t.rows.iter().flat_map(|r| r.cells.iter()) {
                        for p in &cell.paragraphs {
                            collect_pictures(p, &mut found);
                        }
                    }
                }
                BlockContent::Unknown(_) => {}
            }
        }
        found
    }

    pub fn add_paragraph(&mut self, para: Paragraph) {
        self.content.push(BlockContent::Paragraph(para));
    }

    pub fn add_table(&mut self, table: Table) {
        self.content.push(BlockContent::Table(table));
    }

    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:body")))?;

        for content in &self.content {
            match content {
                BlockContent::Paragraph(para) => para.write_to(writer)?,
                BlockContent::Table(table) => table.write_to(writer)?,
                BlockContent::Unknown(node) => node.write_to(writer)?,
            }
        }

        if let Some(sect_pr) = &self.section_properties {
            sect_pr.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:body")))?;
        Ok(())
    }
}

fn collect_pictures<'a>(para: &'a Paragraph, found: &mut Vec<&'a InlinePicture>) {
    found.extend(para.runs().flat_map(|r| r.pictures()));
}
