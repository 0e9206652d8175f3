//! Table row (w:tr)

use crate::error::Result;
use crate::xml::{RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

use super::cell::TableCell;

/// Table row (w:tr)
#[derive(Clone, Debug, Default)]
pub struct TableRow {
    /// w:trPr, preserved
    pub properties: Option<RawXmlNode>,
    pub cells: Vec<TableCell>,
    pub unknown_children: Vec<RawXmlNode>,
}

impl TableRow {
    /// A row of `cell_count` empty cells
    pub fn new(cell_count: usize) -> Self {
        TableRow {
            cells: (0..cell_count).map(|_| TableCell::default()).collect(),
            ..Default::default()
        }
    }

    /// Parse from reader (after w:tr start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, _start: &BytesStart) -> Result<Self> {
        let mut row = TableRow::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"trPr" => {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        row.properties = Some(RawXmlNode::Element(raw));
                    }
                    b"tc" => row.cells.push(TableCell::from_reader(reader, &e)?),
                    _ => {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        row.unknown_children.push(RawXmlNode::Element(raw));
                    }
                },
                Event::Empty(e) => {
                    let raw = RawXmlElement::from_empty(&e);
                    row.unknown_children.push(RawXmlNode::Element(raw));
                }
                Event::End(e) if e.name().local_name().as_ref() == b"tr" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(row)
    }

    pub fn cells(&self) -> impl Iterator<Item = &TableCell> {
        self.cells.iter()
    }

    pub fn cell(&self, index: usize) -> Option<&TableCell> {
        self.cells.get(index)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut TableCell> {
        self.cells.get_mut(index)
    }

    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:tr")))?;

        if let Some(props) = &self.properties {
            props.write_to(writer)?;
        }
        for cell in &self.cells {
            cell.write_to(writer)?;
        }
        for child in &self.unknown_children {
            child.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:tr")))?;
        Ok(())
    }
}
