//! Table elements (w:tbl, w:tr, w:tc)

mod cell;
mod row;

pub use cell::{TableCell, TableCellProperties};
pub use row::TableRow;

use crate::error::Result;
use crate::units::Length;
use crate::xml::{get_attr, RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

/// Grid column definition (w:gridCol)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridColumn {
    /// Width in twips
    pub width: Option<i64>,
}

/// Table element (w:tbl)
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// w:tblPr, kept whole; style and width are edited in place
    pub properties: Option<RawXmlElement>,
    pub grid: Vec<GridColumn>,
    pub rows: Vec<TableRow>,
    pub unknown_children: Vec<RawXmlNode>,
}

impl Table {
    /// A `rows` x `cols` table of empty cells
    pub fn new(rows: usize, cols: usize) -> Self {
        Table {
            grid: vec![GridColumn::default(); cols],
            rows: (0..rows).map(|_| TableRow::new(cols)).collect(),
            ..Default::default()
        }
    }

    /// Parse from reader (after w:tbl start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, _start: &BytesStart) -> Result<Self> {
        let mut table = Table::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"tblPr" => {
                        table.properties = Some(RawXmlElement::from_reader(reader, &e)?);
                    }
                    b"tblGrid" => table.grid = parse_table_grid(reader)?,
                    b"tr" => table.rows.push(TableRow::from_reader(reader, &e)?),
                    _ => {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        table.unknown_children.push(RawXmlNode::Element(raw));
                    }
                },
                Event::Empty(e) => {
                    let raw = RawXmlElement::from_empty(&e);
                    table.unknown_children.push(RawXmlNode::Element(raw));
                }
                Event::End(e) if e.name().local_name().as_ref() == b"tbl" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(table)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column count of the first row
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, |r| r.cells.len())
    }

    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row)?.cells.get(col)
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut TableCell> {
        self.rows.get_mut(row)?.cells.get_mut(col)
    }

    /// Style ID from w:tblStyle
    pub fn style(&self) -> Option<&str> {
        self.properties.as_ref()?.child("w:tblStyle")?.attr("w:val")
    }

    /// Set the table style ID, creating w:tblPr if needed
    pub fn set_style(&mut self, style: &str) {
        let props = self.properties.get_or_insert_with(default_properties);
        props.remove_children("w:tblStyle");
        // tblStyle is the first child of tblPr
        props.children.insert(
            0,
            RawXmlNode::Element(RawXmlElement::new("w:tblStyle").with_attr("w:val", style)),
        );
        props.self_closing = false;
    }

    /// Fix the width of a grid column and of every cell in it
    pub fn set_column_width(&mut self, col: usize, width: Length) {
        let twips = width.as_twips();
        if let Some(grid_col) = self.grid.get_mut(col) {
            grid_col.width = Some(twips);
        }
        for row in &mut self.rows {
            if let Some(cell) = row.cells.get_mut(col) {
                cell.set_width(twips);
            }
        }
    }

    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:tbl")))?;

        match &self.properties {
            Some(props) => props.write_to(writer)?,
            None => default_properties().write_to(writer)?,
        }

        writer.write_event(Event::Start(BytesStart::new("w:tblGrid")))?;
        for col in &self.grid {
            let mut elem = BytesStart::new("w:gridCol");
            if let Some(w) = col.width {
                elem.push_attribute(("w:w", w.to_string().as_str()));
            }
            writer.write_event(Event::Empty(elem))?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:tblGrid")))?;

        for row in &self.rows {
            row.write_to(writer)?;
        }
        for child in &self.unknown_children {
            child.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:tbl")))?;
        Ok(())
    }
}

/// `<w:tblPr><w:tblW w:w="0" w:type="auto"/></w:tblPr>`
fn default_properties() -> RawXmlElement {
    RawXmlElement::new("w:tblPr").with_child(
        RawXmlElement::new("w:tblW")
            .with_attr("w:w", "0")
            .with_attr("w:type", "auto"),
    )
}

fn parse_table_grid<R: BufRead>(reader: &mut Reader<R>) -> Result<Vec<GridColumn>> {
    let mut columns = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(e) if e.name().local_name().as_ref() == b"gridCol" => {
                let width = get_attr(&e, "w:w").and_then(|v| v.parse().ok());
                columns.push(GridColumn { width });
            }
            Event::Start(e) if e.name().local_name().as_ref() == b"gridCol" => {
                // gridCol with a tracked-change child; keep the width only
                let width = get_attr(&e, "w:w").and_then(|v| v.parse().ok());
                RawXmlElement::from_reader(reader, &e)?;
                columns.push(GridColumn { width });
            }
            Event::End(e) if e.name().local_name().as_ref() == b"tblGrid" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(columns)
}
