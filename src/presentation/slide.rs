//! A slide and its shape tree

use crate::error::Result;
use crate::picture::Picture;
use crate::presentation::shape::{Bounds, Geometry, Shape, ShapeKind, SlideTable, TextFrame};
use crate::presentation::template;
use crate::xml;
use log::debug;

/// A slide under construction
#[derive(Clone, Debug)]
pub struct Slide {
    /// `p:sldId/@id`, 256 and up
    id: u32,
    layout: usize,
    shapes: Vec<Shape>,
}

impl Slide {
    pub(crate) fn new(id: u32, layout: usize) -> Self {
        Self {
            id,
            layout,
            shapes: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Index into the presentation's layouts
    pub fn layout_index(&self) -> usize {
        self.layout
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> impl Iterator<Item = &mut Shape> {
        self.shapes.iter_mut()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Text of every text box and table cell, one frame per line
    pub fn text(&self) -> String {
        let mut lines = Vec::new();
        for shape in &self.shapes {
            match &shape.kind {
                ShapeKind::TextBox(frame) => lines.push(frame.text()),
                ShapeKind::Table(table) => {
                    lines.extend(table.cells.iter().flatten().map(|c| c.text()))
                }
                _ => {}
            }
        }
        lines.join("\n")
    }

    pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
        self.shapes.iter().filter_map(|s| s.picture())
    }

    fn next_shape_id(&self) -> u32 {
        self.shapes.iter().map(|s| s.id).max().unwrap_or(1) + 1
    }

    fn push(&mut self, bounds: Bounds, kind: ShapeKind) -> &mut Shape {
        let shape = Shape::new(self.next_shape_id(), bounds, kind);
        debug!(
            "slide {}: {} at ({}, {}) size {} x {} EMU",
            self.id, shape.name, bounds.left, bounds.top, bounds.width, bounds.height
        );
        let index = self.shapes.len();
        self.shapes.push(shape);
        &mut self.shapes[index]
    }

    pub fn add_text_box(&mut self, bounds: Bounds, frame: TextFrame) -> &mut Shape {
        self.push(bounds, ShapeKind::TextBox(frame))
    }

    /// An auto shape with no fill or line set
    pub fn add_auto_shape(&mut self, bounds: Bounds, geometry: Geometry) -> &mut Shape {
        let kind = ShapeKind::AutoShape {
            geometry,
            fill: None,
            line: None,
        };
        self.push(bounds, kind)
    }

    pub fn add_picture(&mut self, picture: Picture, bounds: Bounds) -> &mut Shape {
        self.push(bounds, ShapeKind::Picture(picture))
    }

    /// A `rows` x `cols` table with evenly shared column widths and row heights
    pub fn add_table(&mut self, rows: usize, cols: usize, bounds: Bounds) -> &mut Shape {
        let table = SlideTable::new(rows, cols, bounds.width, bounds.height);
        self.add_table_frame(table, bounds)
    }

    /// Place an already filled table
    pub fn add_table_frame(&mut self, table: SlideTable, bounds: Bounds) -> &mut Shape {
        self.push(bounds, ShapeKind::Table(table))
    }

    /// Serialize to slide XML; `image_rels` holds one relationship ID per picture, in shape order
    pub(crate) fn to_xml(&self, image_rels: &[String]) -> Result<Vec<u8>> {
        let mut writer = template::new_writer()?;
        template::write_root(&mut writer, "p:sld", &[])?;
        xml::write_start(&mut writer, "p:cSld", &[])?;
        xml::write_start(&mut writer, "p:spTree", &[])?;
        template::write_tree_header(&mut writer)?;

        let mut rels = image_rels.iter();
        for shape in &self.shapes {
            let rel = match shape.kind {
                ShapeKind::Picture(_) => rels.next().map(String::as_str),
                _ => None,
            };
            shape.write_to(&mut writer, rel)?;
        }

        xml::write_end(&mut writer, "p:spTree")?;
        xml::write_end(&mut writer, "p:cSld")?;
        xml::write_start(&mut writer, "p:clrMapOvr", &[])?;
        xml::write_empty(&mut writer, "a:masterClrMapping", &[])?;
        xml::write_end(&mut writer, "p:clrMapOvr")?;
        xml::write_end(&mut writer, "p:sld")?;
        Ok(writer.into_inner().into_inner())
    }
}
