//! Styles part (word/styles.xml)
//!
//! New documents get a small default style sheet holding the paragraph and
//! table styles the report helpers refer to.

use crate::error::Result;
use crate::xml::{self, get_w_val};
use quick_xml::events::{BytesDecl, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StyleKind {
    Paragraph,
    Table,
}

impl StyleKind {
    fn as_str(&self) -> &'static str {
        match self {
            StyleKind::Paragraph => "paragraph",
            StyleKind::Table => "table",
        }
    }
}

/// One entry of the default style sheet
struct StyleDef {
    kind: StyleKind,
    id: &'static str,
    name: &'static str,
    default: bool,
    based_on: Option<&'static str>,
    /// Bold run text of this size in half-points
    heading_size: Option<u32>,
    outline_level: Option<u8>,
}

const fn paragraph(id: &'static str, name: &'static str) -> StyleDef {
    StyleDef {
        kind: StyleKind::Paragraph,
        id,
        name,
        default: false,
        based_on: Some("Normal"),
        heading_size: None,
        outline_level: None,
    }
}

const fn heading(id: &'static str, name: &'static str, size: u32, level: u8) -> StyleDef {
    StyleDef {
        heading_size: Some(size),
        outline_level: Some(level),
        ..paragraph(id, name)
    }
}

const DEFAULT_STYLES: [StyleDef; 11] = [
    StyleDef {
        default: true,
        based_on: None,
        ..paragraph("Normal", "Normal")
    },
    heading("Heading1", "Heading 1", 32, 0),
    heading("Heading2", "Heading 2", 26, 1),
    heading("Heading3", "Heading 3", 24, 2),
    heading("Heading4", "Heading 4", 22, 3),
    heading("Heading5", "Heading 5", 22, 4),
    paragraph("ListBullet", "List Bullet"),
    paragraph("Header", "Header"),
    paragraph("Footer", "Footer"),
    StyleDef {
        kind: StyleKind::Table,
        default: true,
        based_on: None,
        ..paragraph("TableNormal", "Normal Table")
    },
    StyleDef {
        kind: StyleKind::Table,
        based_on: Some("TableNormal"),
        ..paragraph("TableGrid", "Table Grid")
    },
];

/// Serialize the default style sheet
pub fn default_styles_xml() -> Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    xml::write_start(&mut writer, "w:styles", &[("xmlns:w", xml::W)])?;

    for def in &DEFAULT_STYLES {
        write_style(&mut writer, def)?;
    }

    xml::write_end(&mut writer, "w:styles")?;
    Ok(writer.into_inner().into_inner())
}

fn write_style<W: std::io::Write>(writer: &mut Writer<W>, def: &StyleDef) -> Result<()> {
    let mut attrs = vec![("w:type", def.kind.as_str()), ("w:styleId", def.id)];
    if def.default {
        attrs.push(("w:default", "1"));
    }
    xml::write_start(writer, "w:style", &attrs)?;
    xml::write_empty(writer, "w:name", &[("w:val", def.name)])?;
    if let Some(base) = def.based_on {
        xml::write_empty(writer, "w:basedOn", &[("w:val", base)])?;
    }
    if def.heading_size.is_some() {
        xml::write_empty(writer, "w:next", &[("w:val", "Normal")])?;
    }
    xml::write_empty(writer, "w:qFormat", &[])?;

    if let Some(level) = def.outline_level {
        let level = level.to_string();
        xml::write_start(writer, "w:pPr", &[])?;
        xml::write_empty(writer, "w:keepNext", &[])?;
        xml::write_empty(writer, "w:outlineLvl", &[("w:val", level.as_str())])?;
        xml::write_end(writer, "w:pPr")?;
    }
    if let Some(size) = def.heading_size {
        let size = size.to_string();
        xml::write_start(writer, "w:rPr", &[])?;
        xml::write_empty(writer, "w:b", &[])?;
        xml::write_empty(writer, "w:sz", &[("w:val", size.as_str())])?;
        xml::write_end(writer, "w:rPr")?;
    }

    match (def.kind, def.id) {
        (StyleKind::Table, "TableNormal") => {
            xml::write_start(writer, "w:tblPr", &[])?;
            xml::write_empty(writer, "w:tblInd", &[("w:w", "0"), ("w:type", "dxa")])?;
            xml::write_start(writer, "w:tblCellMar", &[])?;
            for side in ["w:top", "w:left", "w:bottom", "w:right"] {
                let width = if side == "w:left" || side == "w:right" { "108" } else { "0" };
                xml::write_empty(writer, side, &[("w:w", width), ("w:type", "dxa")])?;
            }
            xml::write_end(writer, "w:tblCellMar")?;
            xml::write_end(writer, "w:tblPr")?;
        }
        (StyleKind::Table, _) => {
            xml::write_start(writer, "w:tblPr", &[])?;
            xml::write_start(writer, "w:tblBorders", &[])?;
            for side in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
                xml::write_empty(
                    writer,
                    side,
                    &[("w:val", "single"), ("w:sz", "4"), ("w:space", "0"), ("w:color", "auto")],
                )?;
            }
            xml::write_end(writer, "w:tblBorders")?;
            xml::write_end(writer, "w:tblPr")?;
        }
        (StyleKind::Paragraph, _) => {}
    }

    xml::write_end(writer, "w:style")?;
    Ok(())
}

/// Names of every style in a styles part, in document order
pub fn style_names(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut names = Vec::new();
    let mut in_style = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().local_name().as_ref() == b"style" => in_style = true,
            Event::End(e) if e.name().local_name().as_ref() == b"style" => in_style = false,
            Event::Empty(e) if in_style && e.name().local_name().as_ref() == b"name" => {
                if let Some(name) = get_w_val(&e) {
                    names.push(name);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_style_names() {
        let xml = String::from_utf8(default_styles_xml().unwrap()).unwrap();
        assert_eq!(
            style_names(&xml).unwrap(),
            vec![
                "Normal",
                "Heading 1",
                "Heading 2",
                "Heading 3",
                "Heading 4",
                "Heading 5",
                "List Bullet",
                "Header",
                "Footer",
                "Normal Table",
                "Table Grid",
            ]
        );
    }

    #[test]
    fn test_default_styles_markup() {
        let xml = String::from_utf8(default_styles_xml().unwrap()).unwrap();
        assert!(xml.contains(
            r#"<w:style w:type="table" w:styleId="TableNormal" w:default="1"><w:name w:val="Normal Table"/>"#
        ));
        assert!(xml.contains(r#"<w:outlineLvl w:val="0"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="32"/>"#));
    }

    #[test]
    fn test_names_outside_styles_are_ignored() {
        let xml = r#"<w:styles><w:latentStyles><w:lsdException w:name="x"/></w:latentStyles><w:style w:styleId="A"><w:name w:val="Alpha"/></w:style></w:styles>"#;
        assert_eq!(style_names(xml).unwrap(), vec!["Alpha"]);
    }
}
