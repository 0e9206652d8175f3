//! Report helpers: titled tables and figures appended to a [`Document`]

use crate::data::{check_grid, LabeledTable};
use crate::document::{Alignment, Document, Run, Table};
use crate::error::Result;
use crate::picture::Picture;
use crate::units::Length;
use log::info;
use std::fmt::Display;
use std::path::Path;

/// Width of a figure's picture
pub const FIGURE_WIDTH_CM: f64 = 15.2;

/// Paragraph and table styles the helpers use
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocStyle {
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Normal,
    ListBullet,
    Header,
    Footer,
    /// Table style
    Table,
}

impl DocStyle {
    /// Display name, as listed by [`style_names`]
    pub fn name(&self) -> &'static str {
        match self {
            DocStyle::Heading1 => "Heading 1",
            DocStyle::Heading2 => "Heading 2",
            DocStyle::Heading3 => "Heading 3",
            DocStyle::Heading4 => "Heading 4",
            DocStyle::Heading5 => "Heading 5",
            DocStyle::Normal => "Normal",
            DocStyle::ListBullet => "List Bullet",
            DocStyle::Header => "Header",
            DocStyle::Footer => "Footer",
            DocStyle::Table => "Normal Table",
        }
    }

    /// Style ID referenced from paragraphs and tables
    pub fn id(&self) -> &'static str {
        match self {
            DocStyle::Heading1 => "Heading1",
            DocStyle::Heading2 => "Heading2",
            DocStyle::Heading3 => "Heading3",
            DocStyle::Heading4 => "Heading4",
            DocStyle::Heading5 => "Heading5",
            DocStyle::Normal => "Normal",
            DocStyle::ListBullet => "ListBullet",
            DocStyle::Header => "Header",
            DocStyle::Footer => "Footer",
            DocStyle::Table => "TableNormal",
        }
    }
}

/// Names of every style defined in the document
pub fn style_names(doc: &Document) -> Result<Vec<String>> {
    doc.style_names()
}

/// Append a titled table with row and column headers.
///
/// `data` holds one entry per row label, each as wide as `columns`. The title
/// goes above the table in the footer style; the optional footnote follows it
/// in the normal style. Nothing is added when the shapes disagree.
pub fn add_table_from_list<C, R, V>(
    doc: &mut Document,
    title: &str,
    columns: &[C],
    rows: &[R],
    data: &[Vec<V>],
    footnote: Option<&str>,
) -> Result<()>
where
    C: Display,
    R: Display,
    V: Display,
{
    check_grid(columns.len(), rows.len(), data)?;
    info!("Adding table '{}' to document", title);

    doc.add_styled_paragraph(title, DocStyle::Footer.id());

    let mut table = Table::new(rows.len() + 1, columns.len() + 1);
    table.set_style(DocStyle::Table.id());

    for (j, column) in columns.iter().enumerate() {
        if let Some(cell) = table.cell_mut(0, j + 1) {
            cell.set_aligned_text(column.to_string(), Alignment::Center);
        }
    }
    for (i, (row, values)) in rows.iter().zip(data).enumerate() {
        if let Some(cell) = table.cell_mut(i + 1, 0) {
            cell.set_aligned_text(row.to_string(), Alignment::Left);
        }
        for (j, value) in values.iter().enumerate() {
            if let Some(cell) = table.cell_mut(i + 1, j + 1) {
                cell.set_aligned_text(value.to_string(), Alignment::Right);
            }
        }
    }
    doc.add_table(table);

    if let Some(note) = footnote.filter(|n| !n.is_empty()) {
        doc.add_styled_paragraph(note, DocStyle::Normal.id());
    }
    info!("Finished adding table '{}' to document", title);
    Ok(())
}

/// [`add_table_from_list`] for a [`LabeledTable`]
pub fn add_table_from_data(
    doc: &mut Document,
    title: &str,
    table: &LabeledTable,
    footnote: Option<&str>,
) -> Result<()> {
    add_table_from_list(
        doc,
        title,
        table.column_labels(),
        table.row_labels(),
        table.values(),
        footnote,
    )
}

/// Append a figure: a two-row table holding the title and the picture, then the source.
pub fn add_figure<P: AsRef<Path>>(
    doc: &mut Document,
    title: &str,
    image_path: P,
    source: Option<&str>,
) -> Result<()> {
    let picture = Picture::open(image_path)?;
    add_figure_picture(doc, title, &picture, source)
}

/// [`add_figure`] with the image already in memory
pub fn add_figure_from_bytes(
    doc: &mut Document,
    title: &str,
    image: Vec<u8>,
    source: Option<&str>,
) -> Result<()> {
    let picture = Picture::from_bytes(image)?;
    add_figure_picture(doc, title, &picture, source)
}

fn add_figure_picture(
    doc: &mut Document,
    title: &str,
    picture: &Picture,
    source: Option<&str>,
) -> Result<()> {
    let (width, height) = picture.fit(Some(Length::cm(FIGURE_WIDTH_CM)), None);
    let drawing = doc.add_picture(picture, width, height)?;

    let mut table = Table::new(2, 1);
    if let Some(cell) = table.cell_mut(0, 0) {
        cell.set_text(title);
        cell.first_paragraph_mut().set_style(DocStyle::Normal.id());
    }
    if let Some(cell) = table.cell_mut(1, 0) {
        let para = cell.first_paragraph_mut();
        para.set_style(DocStyle::Normal.id());
        para.add_run(Run::picture(drawing));
    }
    doc.add_table(table);

    if let Some(source) = source.filter(|s| !s.is_empty()) {
        doc.add_styled_paragraph(source, DocStyle::Normal.id());
    }
    info!("Added figure: {}", title);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BlockContent;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_style_ids_exist_in_new_documents() {
        let doc = Document::new();
        let names = style_names(&doc).unwrap();
        for style in [DocStyle::Normal, DocStyle::Footer, DocStyle::Table, DocStyle::Heading3] {
            assert!(names.iter().any(|n| n == style.name()), "{}", style.name());
        }
    }

    #[test]
    fn test_table_layout() {
        let mut doc = Document::new();
        add_table_from_list(
            &mut doc,
            "Pets",
            &["2022", "2023"],
            &["Dogs", "Cats"],
            &[vec![1, 2], vec![3, 4]],
            Some("Source: survey"),
        )
        .unwrap();

        let blocks = &doc.body().content;
        assert_eq!(blocks.len(), 3);
        assert!(matches!(&blocks[0], BlockContent::Paragraph(p) if p.style() == Some("Footer")));
        assert!(matches!(&blocks[2], BlockContent::Paragraph(p) if p.text() == "Source: survey"));

        let table = doc.table(0).unwrap();
        assert_eq!((table.row_count(), table.column_count()), (3, 3));
        assert_eq!(table.style(), Some("TableNormal"));
        assert_eq!(table.cell(0, 0).unwrap().text(), "");

        let header = table.cell(0, 2).unwrap();
        assert_eq!(header.text(), "2023");
        assert_eq!(header.paragraphs[0].alignment(), Some(Alignment::Center));
        let label = table.cell(2, 0).unwrap();
        assert_eq!(label.text(), "Cats");
        assert_eq!(label.paragraphs[0].alignment(), Some(Alignment::Left));
        let value = table.cell(2, 1).unwrap();
        assert_eq!(value.text(), "3");
        assert_eq!(value.paragraphs[0].alignment(), Some(Alignment::Right));
    }

    #[test]
    fn test_no_footnote_paragraph_without_footnote() {
        let mut doc = Document::new();
        add_table_from_list(&mut doc, "t", &["a"], &["r"], &[vec!["x"]], None).unwrap();
        assert_eq!(doc.body().content.len(), 2);
    }

    #[test]
    fn test_shape_mismatch_leaves_document_untouched() {
        let mut doc = Document::new();
        let err = add_table_from_list(
            &mut doc,
            "t",
            &["a", "b"],
            &["r"],
            &[vec![1, 2, 3]],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { expected: 2, actual: 3, .. }));

        let err = add_table_from_list(&mut doc, "t", &["a"], &["r", "s"], &[vec![1]], None)
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { expected: 2, actual: 1, .. }));
        assert!(doc.body().content.is_empty());
    }

    #[test]
    fn test_figure_structure() {
        let mut doc = Document::new();
        let png = crate::picture::tests::png(200, 100);
        add_figure_from_bytes(&mut doc, "Figure 1", png, Some("Source: x")).unwrap();

        let table = doc.table(0).unwrap();
        assert_eq!((table.row_count(), table.column_count()), (2, 1));
        assert_eq!(table.style(), None);
        assert_eq!(table.cell(0, 0).unwrap().text(), "Figure 1");
        assert_eq!(table.cell(0, 0).unwrap().paragraphs[0].style(), Some("Normal"));

        let pictures = doc.body().pictures();
        assert_eq!(pictures.len(), 1);
        assert_eq!(pictures[0].width, Length::cm(15.2));
        assert_eq!(pictures[0].height, Length::cm(7.6));
        assert_eq!(doc.paragraph(0).unwrap().text(), "Source: x");
    }

    #[test]
    fn test_unsupported_figure_bytes() {
        let mut doc = Document::new();
        let err = add_figure_from_bytes(&mut doc, "t", b"not an image".to_vec(), None).unwrap_err();
        assert!(matches!(err, Error::Image(_)));
        assert!(doc.body().content.is_empty());
    }
}
