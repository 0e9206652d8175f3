//! Integration test: deck helpers and the written PPTX package

use mstk::deck::{self, DeckStyle, TableOptions};
use mstk::opc::rel_types;
use mstk::presentation::{Geometry, ShapeKind};
use mstk::{Error, LabeledTable, Length, Package, Palette, PartUri, Presentation};
use pretty_assertions::assert_eq;
use std::io::Cursor;
use std::path::{Path, PathBuf};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([33, 84, 37]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    std::fs::write(&path, bytes.into_inner()).unwrap();
    path
}

fn slide_xml(package: &Package, n: usize) -> String {
    let uri = PartUri::new(&format!("/ppt/slides/slide{n}.xml")).unwrap();
    package.part(&uri).unwrap().data_as_str().unwrap().to_string()
}

#[test]
fn test_new_slide_has_title_logo_and_header() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let logo = write_png(dir.path(), "logo.png", 100, 100);

    let mut prs = Presentation::new();
    deck::set_slide_size(&mut prs, deck::SLIDE_WIDTH, deck::SLIDE_HEIGHT);
    let slide = deck::add_new_slide(&mut prs, "Pet ownership", &logo).unwrap();

    let shapes = slide.shapes();
    assert_eq!(shapes.len(), 3);

    let title = shapes[0].text_frame().unwrap();
    assert_eq!(title.text(), "Pet ownership");
    assert_eq!(title.runs().next().unwrap().color, Some(Palette::GREEN_MAIN));

    let logo_shape = &shapes[1];
    assert!(logo_shape.picture().is_some());
    assert_eq!(logo_shape.bounds.left, Length::cm(deck::LOGO_LEFT));
    assert_eq!(logo_shape.bounds.height, Length::cm(1.0));
    assert_eq!(logo_shape.bounds.width, Length::cm(1.0));

    assert!(matches!(
        shapes[2].kind,
        ShapeKind::AutoShape {
            geometry: Geometry::Rectangle,
            fill: Some(_),
            line: Some(_)
        }
    ));

    let out = dir.path().join("deck.pptx");
    prs.save(&out).unwrap();
    let package = Package::open(&out).unwrap();
    let xml = slide_xml(&package, 1);
    assert!(xml.contains("<a:t>Pet ownership</a:t>"));
    assert!(xml.contains(r#"<a:srgbClr val="70B658"/>"#));
    assert!(xml.contains(r#"<a:blip r:embed="rId2"/>"#));

    let main = package.main_part().unwrap();
    let slides = package.related_parts(main, rel_types::SLIDE);
    let images = package.related_parts(slides[0], rel_types::IMAGE);
    assert_eq!(images.len(), 1);
    assert!(main
        .data_as_str()
        .unwrap()
        .contains(r#"<p:sldSz cx="9360000" cy="5400000"/>"#));
}

#[test]
fn test_text_and_image_slide() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let logo = write_png(dir.path(), "logo.png", 50, 50);
    let chart = write_png(dir.path(), "chart.png", 400, 200);

    let mut prs = Presentation::new();
    let slide = deck::add_slide_text_and_image(
        &mut prs,
        "Dogs remain the most popular pet.",
        "Dogs",
        &chart,
        &logo,
        &[0.4, 0.6],
    )
    .unwrap();

    let dims = DeckStyle::default().column_dims(&[0.4, 0.6]).unwrap();
    let shapes = slide.shapes();
    assert_eq!(shapes.len(), 5);

    let text = &shapes[3];
    assert_eq!(text.text_frame().unwrap().text(), "Dogs remain the most popular pet.");
    assert_eq!(text.bounds.left, Length::cm(dims[0].left));
    assert_eq!(text.bounds.width, Length::cm(dims[0].width));
    assert_eq!(text.bounds.height, Length::cm(deck::HEIGHT));

    let picture = &shapes[4];
    assert!(picture.picture().is_some());
    assert_eq!(picture.bounds.left, Length::cm(dims[1].left));
    assert_eq!(picture.bounds.top, Length::cm(deck::TOP));
    assert_eq!(picture.bounds.width, Length::cm(dims[1].width));
    assert_eq!(picture.bounds.height, Length::cm(dims[1].width).scale(0.5));

    let package = Package::from_bytes(&prs.to_bytes().unwrap()).unwrap();
    let xml = slide_xml(&package, 1);
    assert!(xml.contains(r#"r:embed="rId2""#));
    assert!(xml.contains(r#"r:embed="rId3""#));
}

#[test]
fn test_bad_proportions_add_nothing() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let logo = write_png(dir.path(), "logo.png", 10, 10);

    let mut prs = Presentation::new();
    let err = deck::add_slide_text_and_blank(&mut prs, "t", "T", &logo, &[0.5, 0.6]).unwrap_err();
    assert!(matches!(err, Error::InvalidProportions(_)));
    assert_eq!(prs.slide_count(), 0);

    let (_, dims) = deck::add_slide_text_and_blank(&mut prs, "t", "T", &logo, &[0.25, 0.75]).unwrap();
    assert_eq!(dims.len(), 2);
    assert_eq!(prs.slide_count(), 1);
}

#[test]
fn test_table_from_data_on_slide() {
    init_logger();
    let table = LabeledTable::from_rows(
        &["Households", "Share"],
        [("Dogs", vec!["12m", "33%"]), ("Cats", vec!["11m", "27%"])],
    )
    .unwrap();

    let mut prs = Presentation::new();
    let slide = deck::add_blank_slide(&mut prs).unwrap();
    let options = TableOptions {
        col_proportions: Some(vec![0.4, 0.3, 0.3]),
        first_cell: "Pet".to_string(),
        ..Default::default()
    };
    deck::add_table_from_data(slide, &table, 1.0, 2.0, 10.0, 3.0, &options).unwrap();

    let package = Package::from_bytes(&prs.to_bytes().unwrap()).unwrap();
    let xml = slide_xml(&package, 1);
    assert!(xml.contains("<p:graphicFrame>"));
    assert!(xml.contains(r#"<a:gridCol w="1440000"/><a:gridCol w="1080000"/><a:gridCol w="1080000"/>"#));
    assert_eq!(xml.matches("<a:tr ").count(), 3);
    assert_eq!(xml.matches(r#"sz="1200""#).count(), 9);
    for text in ["Pet", "Households", "Share", "Dogs", "Cats", "12m", "27%"] {
        assert!(xml.contains(&format!("<a:t>{text}</a:t>")), "{text}");
    }
}
