//! Integration test: report helpers on a saved and reopened DOCX

use mstk::document::Alignment;
use mstk::opc::rel_types;
use mstk::report::{self, DocStyle};
use mstk::{Document, Error, LabeledTable, Length};
use pretty_assertions::assert_eq;
use std::io::Cursor;
use std::path::{Path, PathBuf};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([112, 182, 88]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    std::fs::write(&path, bytes.into_inner()).unwrap();
    path
}

fn pets() -> LabeledTable {
    LabeledTable::from_rows(
        &["2022", "2023"],
        [("Dogs", vec![12.0, 13.5]), ("Cats", vec![11.0, 12.25])],
    )
    .unwrap()
}

#[test]
fn test_table_survives_save_and_reopen() {
    init_logger();
    let mut doc = Document::new();
    report::add_table_from_data(&mut doc, "Pet population (m)", &pets(), Some("Source: survey"))
        .unwrap();

    let bytes = doc.to_bytes().unwrap();
    assert_eq!(&bytes[0..2], b"PK");
    let doc = Document::from_bytes(&bytes).unwrap();

    assert_eq!(doc.paragraph_count(), 2);
    assert_eq!(doc.text(), "Pet population (m)\nSource: survey");
    assert_eq!(doc.paragraph(0).unwrap().style(), Some(DocStyle::Footer.id()));
    assert_eq!(doc.paragraph(1).unwrap().style(), Some(DocStyle::Normal.id()));

    let table = doc.table(0).unwrap();
    assert_eq!(table.style(), Some("TableNormal"));
    let texts: Vec<Vec<String>> = table
        .rows()
        .map(|row| row.cells().map(|c| c.text()).collect())
        .collect();
    assert_eq!(
        texts,
        vec![
            vec!["", "2022", "2023"],
            vec!["Dogs", "12.0", "13.5"],
            vec!["Cats", "11.0", "12.25"],
        ]
    );

    let alignment = |r, c| table.cell(r, c).unwrap().paragraphs[0].alignment();
    assert_eq!(alignment(0, 1), Some(Alignment::Center));
    assert_eq!(alignment(1, 0), Some(Alignment::Left));
    assert_eq!(alignment(2, 2), Some(Alignment::Right));
}

#[test]
fn test_mismatched_labels_are_rejected() {
    init_logger();
    let mut doc = Document::new();
    let err = report::add_table_from_list(
        &mut doc,
        "Broken",
        &["a", "b", "c"],
        &["r1", "r2"],
        &[vec![1, 2, 3], vec![4, 5]],
        None,
    )
    .unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));
    assert_eq!(doc.paragraph_count(), 0);
    assert_eq!(doc.tables().count(), 0);
}

#[test]
fn test_figure_is_stored_as_media() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "chart.png", 400, 300);

    let mut doc = Document::new();
    report::add_figure(&mut doc, "Figure 1: Dogs", &image, Some("Source: survey")).unwrap();
    let out = dir.path().join("figure.docx");
    doc.save(&out).unwrap();

    let doc = Document::open(&out).unwrap();
    let table = doc.table(0).unwrap();
    assert_eq!(table.cell(0, 0).unwrap().text(), "Figure 1: Dogs");
    assert_eq!(doc.text(), "Source: survey");

    let pictures = doc.body().pictures();
    assert_eq!(pictures.len(), 1);
    assert_eq!(pictures[0].width, Length::cm(report::FIGURE_WIDTH_CM));
    assert_eq!(pictures[0].height, Length::cm(report::FIGURE_WIDTH_CM * 0.75));

    let rel = doc.relationships().get(&pictures[0].rel_id).unwrap();
    assert_eq!(rel.rel_type, rel_types::IMAGE);
    assert_eq!(rel.target, "media/image1.png");
    let media: Vec<_> = doc
        .package()
        .part_uris()
        .filter(|u| u.as_str().starts_with("/word/media/"))
        .collect();
    assert_eq!(media.len(), 1);
}

#[test]
fn test_missing_figure_file() {
    init_logger();
    let mut doc = Document::new();
    let err = report::add_figure(&mut doc, "Missing", "does/not/exist.png", None).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(doc.tables().count(), 0);
}

#[test]
fn test_style_names_listed() {
    let doc = Document::new();
    let names = report::style_names(&doc).unwrap();
    assert!(names.contains(&"Heading 1".to_string()));
    assert!(names.contains(&DocStyle::Table.name().to_string()));
}
