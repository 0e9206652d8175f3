//! Slide-deck helpers: branded slides, text frames, pictures, shapes and tables
//!
//! All positions and sizes are in centimeters. The free functions use the
//! default [`DeckStyle`]; build a custom style to move the title, logo or
//! header strip.

use crate::color::{Palette, RgbColor};
use crate::data::{check_grid, LabeledTable};
use crate::error::{Error, Result};
use crate::layout::{self, check_proportions, Rect};
use crate::picture::Picture;
use crate::presentation::{
    Bounds, Geometry, Presentation, Shape, Slide, SlideTable, TextFrame, BLANK_LAYOUT,
};
use crate::units::{cm_box, Length};
use log::{debug, info};
use std::fmt::Display;
use std::path::Path;

pub const SLIDE_WIDTH: f64 = 26.0;
pub const SLIDE_HEIGHT: f64 = 15.0;
pub const TOP: f64 = 1.6;
pub const LEFT: f64 = 0.1;
pub const HEIGHT: f64 = SLIDE_HEIGHT - TOP;
pub const WIDTH: f64 = SLIDE_WIDTH - 2.0 * LEFT;

pub const HEADLINE_HEIGHT: f64 = 0.1;
pub const HEADLINE_TOP: f64 = 1.2;
pub const HEADLINE_LEFT: f64 = 0.0;

pub const LOGO_HEIGHT: f64 = 1.0;
pub const LOGO_TOP: f64 = 0.1;
pub const LOGO_LEFT: f64 = SLIDE_WIDTH - 1.1;

pub const TITLE_HEIGHT: f64 = 1.0;
pub const TITLE_WIDTH: f64 = SLIDE_WIDTH - 2.0;
pub const TITLE_TOP: f64 = 0.1;
pub const TITLE_LEFT: f64 = 0.3;

/// Default table font size in points
pub const TABLE_FONT_SIZE: f64 = 12.0;

/// Geometry and accent colour of a branded slide
#[derive(Clone, Debug, PartialEq)]
pub struct DeckStyle {
    pub slide_width: f64,
    pub slide_height: f64,
    /// Content area below the header
    pub top: f64,
    pub left: f64,
    pub height: f64,
    pub width: f64,
    pub headline_height: f64,
    pub headline_top: f64,
    pub headline_left: f64,
    pub logo_height: f64,
    pub logo_top: f64,
    pub logo_left: f64,
    pub title_height: f64,
    pub title_width: f64,
    pub title_top: f64,
    pub title_left: f64,
    /// Title text and header strip
    pub accent: RgbColor,
}

impl Default for DeckStyle {
    fn default() -> Self {
        Self {
            slide_width: SLIDE_WIDTH,
            slide_height: SLIDE_HEIGHT,
            top: TOP,
            left: LEFT,
            height: HEIGHT,
            width: WIDTH,
            headline_height: HEADLINE_HEIGHT,
            headline_top: HEADLINE_TOP,
            headline_left: HEADLINE_LEFT,
            logo_height: LOGO_HEIGHT,
            logo_top: LOGO_TOP,
            logo_left: LOGO_LEFT,
            title_height: TITLE_HEIGHT,
            title_width: TITLE_WIDTH,
            title_top: TITLE_TOP,
            title_left: TITLE_LEFT,
            accent: Palette::GREEN_MAIN,
        }
    }
}

impl DeckStyle {
    /// Columns across the content area
    pub fn column_dims(&self, proportions: &[f64]) -> Result<Vec<Rect>> {
        layout::column_dims(self.left, self.width, proportions, self.top, self.height)
    }

    /// Rows down the content area
    pub fn row_dims(&self, proportions: &[f64]) -> Result<Vec<Rect>> {
        layout::row_dims(self.top, self.height, proportions, self.left, self.width)
    }

    pub fn add_title<'a>(&self, slide: &'a mut Slide, title: &str) -> &'a mut Shape {
        add_textframe(
            slide,
            self.title_left,
            self.title_top,
            self.title_width,
            self.title_height,
            title,
            self.accent,
        )
    }

    pub fn add_logo<'a, P: AsRef<Path>>(&self, slide: &'a mut Slide, logo: P) -> Result<&'a mut Shape> {
        let picture = Picture::open(logo)?;
        Ok(self.place_logo(slide, picture))
    }

    fn place_logo<'a>(&self, slide: &'a mut Slide, logo: Picture) -> &'a mut Shape {
        add_picture(slide, logo, self.logo_left, self.logo_top, None, Some(self.logo_height))
    }

    /// The strip under the title
    pub fn add_header_line<'a>(&self, slide: &'a mut Slide) -> &'a mut Shape {
        add_shape(
            slide,
            self.headline_left,
            self.headline_top,
            self.slide_width,
            self.headline_height,
            self.accent,
            Geometry::Rectangle,
        )
    }

    /// A blank slide with title, logo and header strip
    pub fn add_new_slide<'a, P: AsRef<Path>>(
        &self,
        prs: &'a mut Presentation,
        title: &str,
        logo: P,
    ) -> Result<&'a mut Slide> {
        let logo = Picture::open(logo)?;
        self.new_slide_with(prs, title, logo)
    }

    fn new_slide_with<'a>(
        &self,
        prs: &'a mut Presentation,
        title: &str,
        logo: Picture,
    ) -> Result<&'a mut Slide> {
        let slide = add_blank_slide(prs)?;
        self.add_title(slide, title);
        self.place_logo(slide, logo);
        self.add_header_line(slide);
        Ok(slide)
    }

    /// A new slide split into columns by `proportions`, with `text` in the first one
    pub fn add_slide_text_and_blank<'a, P: AsRef<Path>>(
        &self,
        prs: &'a mut Presentation,
        text: &str,
        title: &str,
        logo: P,
        proportions: &[f64],
    ) -> Result<(&'a mut Slide, Vec<Rect>)> {
        let dims = self.column_dims(proportions)?;
        let logo = Picture::open(logo)?;
        let slide = self.text_slide(prs, text, title, logo, &dims)?;
        Ok((slide, dims))
    }

    /// [`add_slide_text_and_blank`](Self::add_slide_text_and_blank) with `image` in the second column
    pub fn add_slide_text_and_image<'a, P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        prs: &'a mut Presentation,
        text: &str,
        title: &str,
        image: P,
        logo: Q,
        proportions: &[f64],
    ) -> Result<&'a mut Slide> {
        let dims = self.column_dims(proportions)?;
        let Some(column) = dims.get(1) else {
            return Err(Error::ShapeMismatch {
                what: "columns for text and image",
                expected: 2,
                actual: dims.len(),
            });
        };
        let picture = Picture::open(image)?;
        let logo = Picture::open(logo)?;

        let (left, width) = (column.left, column.width);
        let slide = self.text_slide(prs, text, title, logo, &dims)?;
        add_picture(slide, picture, left, self.top, Some(width), None);
        Ok(slide)
    }

    fn text_slide<'a>(
        &self,
        prs: &'a mut Presentation,
        text: &str,
        title: &str,
        logo: Picture,
        dims: &[Rect],
    ) -> Result<&'a mut Slide> {
        let slide = self.new_slide_with(prs, title, logo)?;
        if let Some(first) = dims.first() {
            add_textframe(slide, first.left, self.top, first.width, self.height, text, RgbColor::BLACK);
        }
        Ok(slide)
    }
}

/// Table placement options
#[derive(Clone, Debug, PartialEq)]
pub struct TableOptions {
    /// Width share of each column, row-header column first; even split when `None`
    pub col_proportions: Option<Vec<f64>>,
    /// Text of the top-left cell
    pub first_cell: String,
    /// Font size in points of every cell
    pub font_size: f64,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            col_proportions: None,
            first_cell: " ".to_string(),
            font_size: TABLE_FONT_SIZE,
        }
    }
}

/// Append a slide using the blank layout
pub fn add_blank_slide(prs: &mut Presentation) -> Result<&mut Slide> {
    prs.add_slide(BLANK_LAYOUT)
}

/// A word-wrapped text box holding `text` in one run coloured `rgb`
pub fn add_textframe<'a>(
    slide: &'a mut Slide,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    text: &str,
    rgb: RgbColor,
) -> &'a mut Shape {
    let mut frame = TextFrame::new(text);
    frame.word_wrap = Some(true);
    frame.runs_mut().for_each(|run| run.color = Some(rgb));
    slide.add_text_box(Bounds::cm(left, top, width, height), frame)
}

/// Place the picture at `path`.
///
/// A missing (or zero) width or height follows from the aspect ratio; with
/// neither the picture keeps its native size.
pub fn add_image<P: AsRef<Path>>(
    slide: &mut Slide,
    path: P,
    left: f64,
    top: f64,
    width: Option<f64>,
    height: Option<f64>,
) -> Result<&mut Shape> {
    let picture = Picture::open(path)?;
    Ok(add_picture(slide, picture, left, top, width, height))
}

/// [`add_image`] for a picture already in memory
pub fn add_picture(
    slide: &mut Slide,
    picture: Picture,
    left: f64,
    top: f64,
    width: Option<f64>,
    height: Option<f64>,
) -> &mut Shape {
    let b = cm_box(left, top, width, height);
    let (width, height) = picture.fit(b.width, b.height);
    slide.add_picture(picture, Bounds::new(b.left, b.top, width, height))
}

/// An auto shape filled and outlined in `rgb`
pub fn add_shape(
    slide: &mut Slide,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    rgb: RgbColor,
    geometry: Geometry,
) -> &mut Shape {
    let shape = slide.add_auto_shape(Bounds::cm(left, top, width, height), geometry);
    shape.set_fill(rgb);
    shape.set_line(rgb);
    shape
}

pub fn add_title<'a>(slide: &'a mut Slide, title: &str) -> &'a mut Shape {
    DeckStyle::default().add_title(slide, title)
}

pub fn add_logo<P: AsRef<Path>>(slide: &mut Slide, logo: P) -> Result<&mut Shape> {
    DeckStyle::default().add_logo(slide, logo)
}

pub fn add_header_line(slide: &mut Slide) -> &mut Shape {
    DeckStyle::default().add_header_line(slide)
}

pub fn add_new_slide<'a, P: AsRef<Path>>(
    prs: &'a mut Presentation,
    title: &str,
    logo: P,
) -> Result<&'a mut Slide> {
    DeckStyle::default().add_new_slide(prs, title, logo)
}

pub fn add_slide_text_and_blank<'a, P: AsRef<Path>>(
    prs: &'a mut Presentation,
    text: &str,
    title: &str,
    logo: P,
    proportions: &[f64],
) -> Result<(&'a mut Slide, Vec<Rect>)> {
    DeckStyle::default().add_slide_text_and_blank(prs, text, title, logo, proportions)
}

pub fn add_slide_text_and_image<'a, P: AsRef<Path>, Q: AsRef<Path>>(
    prs: &'a mut Presentation,
    text: &str,
    title: &str,
    image: P,
    logo: Q,
    proportions: &[f64],
) -> Result<&'a mut Slide> {
    DeckStyle::default().add_slide_text_and_image(prs, text, title, image, logo, proportions)
}

/// Add a table with a header row and a row-header column.
///
/// The table is `rows + 1` by `columns + 1`; its top-left cell holds
/// `options.first_cell` and every run is set in `options.font_size`.
#[allow(clippy::too_many_arguments)]
pub fn add_table_from_list<'a, C, R, V>(
    slide: &'a mut Slide,
    columns: &[C],
    rows: &[R],
    values: &[Vec<V>],
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    options: &TableOptions,
) -> Result<&'a mut Shape>
where
    C: Display,
    R: Display,
    V: Display,
{
    check_grid(columns.len(), rows.len(), values)?;
    let (nrows, ncols) = (rows.len() + 1, columns.len() + 1);
    if let Some(props) = &options.col_proportions {
        if props.len() != ncols {
            return Err(Error::ShapeMismatch {
                what: "column proportions vs table columns",
                expected: ncols,
                actual: props.len(),
            });
        }
        check_proportions(props)?;
    }
    let slide_id = slide.id();
    info!("Adding {} x {} table to slide {}", nrows, ncols, slide_id);

    let bounds = Bounds::cm(left, top, width, height);
    let mut table = SlideTable::new(nrows, ncols, bounds.width, bounds.height);

    if let Some(props) = &options.col_proportions {
        for (i, p) in props.iter().enumerate() {
            table.set_column_width(i, Length::cm(width * p));
        }
        debug!("column widths {:?}", table.column_widths);
    }

    let mut set = |r: usize, c: usize, text: String| {
        if let Some(cell) = table.cell_mut(r, c) {
            cell.set_text(text);
        }
    };
    set(0, 0, options.first_cell.clone());
    for (j, column) in columns.iter().enumerate() {
        set(0, j + 1, column.to_string());
    }
    for (i, row) in rows.iter().enumerate() {
        set(i + 1, 0, row.to_string());
    }
    for (i, row) in values.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            set(i + 1, j + 1, value.to_string());
        }
    }

    table
        .runs_mut()
        .for_each(|run| run.size = Some(options.font_size));
    let shape = slide.add_table_frame(table, bounds);
    info!("Finished adding table to slide {}", slide_id);
    Ok(shape)
}

/// [`add_table_from_list`] for a [`LabeledTable`]
#[allow(clippy::too_many_arguments)]
pub fn add_table_from_data<'a>(
    slide: &'a mut Slide,
    table: &LabeledTable,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    options: &TableOptions,
) -> Result<&'a mut Shape> {
    add_table_from_list(
        slide,
        table.column_labels(),
        table.row_labels(),
        table.values(),
        left,
        top,
        width,
        height,
        options,
    )
}

/// Set the size of every slide, in centimeters
pub fn set_slide_size(prs: &mut Presentation, width: f64, height: f64) {
    prs.set_slide_size(Length::cm(width), Length::cm(height));
}
