//! Shapes placed on a slide's shape tree (p:spTree)

use crate::color::RgbColor;
use crate::error::Result;
use crate::picture::Picture;
use crate::units::Length;
use crate::xml::{self, TABLE_URI};
use quick_xml::Writer;
use std::io::Write;

/// Built-in table style "Medium Style 2 - Accent 1"
pub(crate) const DEFAULT_TABLE_STYLE: &str = "{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}";

/// Position and extent of a shape
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    pub left: Length,
    pub top: Length,
    pub width: Length,
    pub height: Length,
}

impl Bounds {
    pub fn new(left: Length, top: Length, width: Length, height: Length) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bounds given in centimeters
    pub fn cm(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(
            Length::cm(left),
            Length::cm(top),
            Length::cm(width),
            Length::cm(height),
        )
    }

    fn write_xfrm<W: Write>(&self, writer: &mut Writer<W>, tag: &str) -> Result<()> {
        let (x, y) = (self.left.to_string(), self.top.to_string());
        let (cx, cy) = (self.width.to_string(), self.height.to_string());
        xml::write_start(writer, tag, &[])?;
        xml::write_empty(writer, "a:off", &[("x", x.as_str()), ("y", y.as_str())])?;
        xml::write_empty(writer, "a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
        xml::write_end(writer, tag)
    }
}

/// Preset geometry of an auto shape
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Geometry {
    #[default]
    Rectangle,
    RoundedRectangle,
    Ellipse,
    Triangle,
    RightArrow,
    Chevron,
}

impl Geometry {
    /// `a:prstGeom/@prst` value
    pub fn preset(&self) -> &'static str {
        match self {
            Geometry::Rectangle => "rect",
            Geometry::RoundedRectangle => "roundRect",
            Geometry::Ellipse => "ellipse",
            Geometry::Triangle => "triangle",
            Geometry::RightArrow => "rightArrow",
            Geometry::Chevron => "chevron",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Geometry::Rectangle => "Rectangle",
            Geometry::RoundedRectangle => "Rounded Rectangle",
            Geometry::Ellipse => "Oval",
            Geometry::Triangle => "Isosceles Triangle",
            Geometry::RightArrow => "Right Arrow",
            Geometry::Chevron => "Chevron",
        }
    }
}

/// A run of text with its character formatting
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub color: Option<RgbColor>,
    /// Font size in points
    pub size: Option<f64>,
    pub bold: bool,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let size = self.size.map(|pt| ((pt * 100.0).round() as i64).to_string());
        let mut attrs = vec![("lang", "en-GB")];
        if let Some(size) = &size {
            attrs.push(("sz", size.as_str()));
        }
        if self.bold {
            attrs.push(("b", "1"));
        }
        attrs.push(("dirty", "0"));

        xml::write_start(writer, "a:r", &[])?;
        match self.color {
            Some(color) => {
                xml::write_start(writer, "a:rPr", &attrs)?;
                write_solid_fill(writer, color)?;
                xml::write_end(writer, "a:rPr")?;
            }
            None => xml::write_empty(writer, "a:rPr", &attrs)?,
        }
        xml::write_text_element(writer, "a:t", &self.text)?;
        xml::write_end(writer, "a:r")
    }
}

/// A paragraph of a text frame (a:p)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextParagraph {
    pub runs: Vec<TextRun>,
}

impl TextParagraph {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Text body of a text box or table cell
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextFrame {
    pub paragraphs: Vec<TextParagraph>,
    /// `Some(true)` wraps at the shape edge, `Some(false)` never wraps
    pub word_wrap: Option<bool>,
}

impl TextFrame {
    /// A frame holding one paragraph with one run of `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![TextParagraph {
                runs: vec![TextRun::new(text)],
            }],
            word_wrap: None,
        }
    }

    /// Replace the content with a single run of `text`
    pub fn set_text(&mut self, text: impl Into<String>) {
        *self = Self {
            word_wrap: self.word_wrap,
            ..Self::new(text)
        };
    }

    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.paragraphs.iter().flat_map(|p| p.runs.iter())
    }

    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut TextRun> {
        self.paragraphs.iter_mut().flat_map(|p| p.runs.iter_mut())
    }

    /// Paragraph texts joined by newlines
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write as `tag` (`p:txBody` in shapes, `a:txBody` in table cells)
    fn write_to<W: Write>(&self, writer: &mut Writer<W>, tag: &str) -> Result<()> {
        xml::write_start(writer, tag, &[])?;
        match self.word_wrap {
            Some(wrap) => {
                let wrap = if wrap { "square" } else { "none" };
                xml::write_start(writer, "a:bodyPr", &[("wrap", wrap), ("rtlCol", "0")])?;
                xml::write_empty(writer, "a:spAutoFit", &[])?;
                xml::write_end(writer, "a:bodyPr")?;
            }
            None => xml::write_empty(writer, "a:bodyPr", &[])?,
        }
        xml::write_empty(writer, "a:lstStyle", &[])?;

        if self.paragraphs.is_empty() {
            xml::write_empty(writer, "a:p", &[])?;
        }
        for para in &self.paragraphs {
            xml::write_start(writer, "a:p", &[])?;
            for run in &para.runs {
                run.write_to(writer)?;
            }
            xml::write_end(writer, "a:p")?;
        }
        xml::write_end(writer, tag)
    }
}

/// A table inside a graphic frame (a:tbl)
#[derive(Clone, Debug, PartialEq)]
pub struct SlideTable {
    pub column_widths: Vec<Length>,
    pub row_heights: Vec<Length>,
    /// Row-major
    pub cells: Vec<Vec<TextFrame>>,
}

impl SlideTable {
    /// An empty `rows` x `cols` table sharing `width` and `height` evenly
    pub fn new(rows: usize, cols: usize, width: Length, height: Length) -> Self {
        let share = |total: Length, n: usize| {
            if n == 0 {
                Vec::new()
            } else {
                vec![total.scale(1.0 / n as f64); n]
            }
        };
        Self {
            column_widths: share(width, cols),
            row_heights: share(height, rows),
            cells: vec![vec![TextFrame::default(); cols]; rows],
        }
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&TextFrame> {
        self.cells.get(row)?.get(col)
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut TextFrame> {
        self.cells.get_mut(row)?.get_mut(col)
    }

    pub fn set_column_width(&mut self, col: usize, width: Length) {
        if let Some(w) = self.column_widths.get_mut(col) {
            *w = width;
        }
    }

    /// Every run in every cell
    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut TextRun> {
        self.cells.iter_mut().flatten().flat_map(|c| c.runs_mut())
    }

    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        xml::write_start(writer, "a:tbl", &[])?;
        xml::write_start(writer, "a:tblPr", &[("firstRow", "1"), ("bandRow", "1")])?;
        xml::write_text_element(writer, "a:tableStyleId", DEFAULT_TABLE_STYLE)?;
        xml::write_end(writer, "a:tblPr")?;

        xml::write_start(writer, "a:tblGrid", &[])?;
        for width in &self.column_widths {
            let w = width.to_string();
            xml::write_empty(writer, "a:gridCol", &[("w", w.as_str())])?;
        }
        xml::write_end(writer, "a:tblGrid")?;

        for (row, height) in self.cells.iter().zip(&self.row_heights) {
            let h = height.to_string();
            xml::write_start(writer, "a:tr", &[("h", h.as_str())])?;
            for cell in row {
                xml::write_start(writer, "a:tc", &[])?;
                cell.write_to(writer, "a:txBody")?;
                xml::write_empty(writer, "a:tcPr", &[])?;
                xml::write_end(writer, "a:tc")?;
            }
            xml::write_end(writer, "a:tr")?;
        }
        xml::write_end(writer, "a:tbl")
    }
}

/// What a shape is
#[derive(Clone, Debug)]
pub enum ShapeKind {
    TextBox(TextFrame),
    AutoShape {
        geometry: Geometry,
        fill: Option<RgbColor>,
        line: Option<RgbColor>,
    },
    Picture(Picture),
    Table(SlideTable),
}

/// A shape on a slide
#[derive(Clone, Debug)]
pub struct Shape {
    /// Unique within the slide; 1 is the shape tree itself
    pub id: u32,
    pub name: String,
    pub bounds: Bounds,
    pub kind: ShapeKind,
}

impl Shape {
    pub(crate) fn new(id: u32, bounds: Bounds, kind: ShapeKind) -> Self {
        let label = match &kind {
            ShapeKind::TextBox(_) => "TextBox",
            ShapeKind::AutoShape { geometry, .. } => geometry.label(),
            ShapeKind::Picture(_) => "Picture",
            ShapeKind::Table(_) => "Table",
        };
        Self {
            id,
            name: format!("{} {}", label, id - 1),
            bounds,
            kind,
        }
    }

    pub fn text_frame(&self) -> Option<&TextFrame> {
        match &self.kind {
            ShapeKind::TextBox(frame) => Some(frame),
            _ => None,
        }
    }

    pub fn text_frame_mut(&mut self) -> Option<&mut TextFrame> {
        match &mut self.kind {
            ShapeKind::TextBox(frame) => Some(frame),
            _ => None,
        }
    }

    pub fn table(&self) -> Option<&SlideTable> {
        match &self.kind {
            ShapeKind::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn table_mut(&mut self) -> Option<&mut SlideTable> {
        match &mut self.kind {
            ShapeKind::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn picture(&self) -> Option<&Picture> {
        match &self.kind {
            ShapeKind::Picture(picture) => Some(picture),
            _ => None,
        }
    }

    /// Solid fill of an auto shape; ignored for other kinds
    pub fn set_fill(&mut self, color: RgbColor) {
        if let ShapeKind::AutoShape { fill, .. } = &mut self.kind {
            *fill = Some(color);
        }
    }

    /// Outline colour of an auto shape; ignored for other kinds
    pub fn set_line(&mut self, color: RgbColor) {
        if let ShapeKind::AutoShape { line, .. } = &mut self.kind {
            *line = Some(color);
        }
    }

    /// Write the shape; pictures need the relationship ID of their image part
    pub(crate) fn write_to<W: Write>(
        &self,
        writer: &mut Writer<W>,
        image_rel: Option<&str>,
    ) -> Result<()> {
        let id = self.id.to_string();
        let c_nv_pr = [("id", id.as_str()), ("name", self.name.as_str())];

        match &self.kind {
            ShapeKind::TextBox(frame) => {
                xml::write_start(writer, "p:sp", &[])?;
                xml::write_start(writer, "p:nvSpPr", &[])?;
                xml::write_empty(writer, "p:cNvPr", &c_nv_pr)?;
                xml::write_empty(writer, "p:cNvSpPr", &[("txBox", "1")])?;
                xml::write_empty(writer, "p:nvPr", &[])?;
                xml::write_end(writer, "p:nvSpPr")?;
                self.write_sp_pr(writer, "rect", |w| xml::write_empty(w, "a:noFill", &[]))?;
                frame.write_to(writer, "p:txBody")?;
                xml::write_end(writer, "p:sp")
            }
            ShapeKind::AutoShape {
                geometry,
                fill,
                line,
            } => {
                xml::write_start(writer, "p:sp", &[])?;
                xml::write_start(writer, "p:nvSpPr", &[])?;
                xml::write_empty(writer, "p:cNvPr", &c_nv_pr)?;
                xml::write_empty(writer, "p:cNvSpPr", &[])?;
                xml::write_empty(writer, "p:nvPr", &[])?;
                xml::write_end(writer, "p:nvSpPr")?;
                self.write_sp_pr(writer, geometry.preset(), |w| {
                    if let Some(color) = fill {
                        write_solid_fill(w, *color)?;
                    }
                    if let Some(color) = line {
                        xml::write_start(w, "a:ln", &[])?;
                        write_solid_fill(w, *color)?;
                        xml::write_end(w, "a:ln")?;
                    }
                    Ok(())
                })?;
                xml::write_end(writer, "p:sp")
            }
            ShapeKind::Picture(picture) => {
                let descr = format!("image.{}", picture.format().extension());
                let rel_id = image_rel.unwrap_or_default();
                xml::write_start(writer, "p:pic", &[])?;
                xml::write_start(writer, "p:nvPicPr", &[])?;
                xml::write_empty(
                    writer,
                    "p:cNvPr",
                    &[c_nv_pr[0], c_nv_pr[1], ("descr", descr.as_str())],
                )?;
                xml::write_start(writer, "p:cNvPicPr", &[])?;
                xml::write_empty(writer, "a:picLocks", &[("noChangeAspect", "1")])?;
                xml::write_end(writer, "p:cNvPicPr")?;
                xml::write_empty(writer, "p:nvPr", &[])?;
                xml::write_end(writer, "p:nvPicPr")?;

                xml::write_start(writer, "p:blipFill", &[])?;
                xml::write_empty(writer, "a:blip", &[("r:embed", rel_id)])?;
                xml::write_start(writer, "a:stretch", &[])?;
                xml::write_empty(writer, "a:fillRect", &[])?;
                xml::write_end(writer, "a:stretch")?;
                xml::write_end(writer, "p:blipFill")?;

                self.write_sp_pr(writer, "rect", |_| Ok(()))?;
                xml::write_end(writer, "p:pic")
            }
            ShapeKind::Table(table) => {
                xml::write_start(writer, "p:graphicFrame", &[])?;
                xml::write_start(writer, "p:nvGraphicFramePr", &[])?;
                xml::write_empty(writer, "p:cNvPr", &c_nv_pr)?;
                xml::write_start(writer, "p:cNvGraphicFramePr", &[])?;
                xml::write_empty(writer, "a:graphicFrameLocks", &[("noGrp", "1")])?;
                xml::write_end(writer, "p:cNvGraphicFramePr")?;
                xml::write_empty(writer, "p:nvPr", &[])?;
                xml::write_end(writer, "p:nvGraphicFramePr")?;
                self.bounds.write_xfrm(writer, "p:xfrm")?;

                xml::write_start(writer, "a:graphic", &[])?;
                xml::write_start(writer, "a:graphicData", &[("uri", TABLE_URI)])?;
                table.write_to(writer)?;
                xml::write_end(writer, "a:graphicData")?;
                xml::write_end(writer, "a:graphic")?;
                xml::write_end(writer, "p:graphicFrame")
            }
        }
    }

    /// `p:spPr` with transform and preset geometry; `fill` writes what follows the geometry
    fn write_sp_pr<W, F>(&self, writer: &mut Writer<W>, preset: &str, fill: F) -> Result<()>
    where
        W: Write,
        F: FnOnce(&mut Writer<W>) -> Result<()>,
    {
        xml::write_start(writer, "p:spPr", &[])?;
        self.bounds.write_xfrm(writer, "a:xfrm")?;
        xml::write_start(writer, "a:prstGeom", &[("prst", preset)])?;
        xml::write_empty(writer, "a:avLst", &[])?;
        xml::write_end(writer, "a:prstGeom")?;
        fill(writer)?;
        xml::write_end(writer, "p:spPr")
    }
}

fn write_solid_fill<W: Write>(writer: &mut Writer<W>, color: RgbColor) -> Result<()> {
    let hex = color.hex();
    xml::write_start(writer, "a:solidFill", &[])?;
    xml::write_empty(writer, "a:srgbClr", &[("val", hex.as_str())])?;
    xml::write_end(writer, "a:solidFill")
}
