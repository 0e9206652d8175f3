//! Minimal master, layouts and theme for new presentations

use crate::error::Result;
use crate::presentation::shape::DEFAULT_TABLE_STYLE;
use crate::xml::{self, presentation_namespaces};
use quick_xml::events::{BytesDecl, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};

/// Layout names and `@type`, in the order of the stock Office template
pub const LAYOUTS: [(&str, &str); 11] = [
    ("Title Slide", "title"),
    ("Title and Content", "obj"),
    ("Section Header", "secHead"),
    ("Two Content", "twoObj"),
    ("Comparison", "twoTxTwoObj"),
    ("Title Only", "titleOnly"),
    ("Blank", "blank"),
    ("Content with Caption", "objTx"),
    ("Picture with Caption", "picTx"),
    ("Title and Vertical Text", "vertTx"),
    ("Vertical Title and Text", "vertTitleAndTx"),
];

/// Index of the blank layout in [`LAYOUTS`]
pub const BLANK_LAYOUT: usize = 6;

/// First ID of the master and its layouts; ids must be at least 2^31
const MASTER_ID: u64 = 2_147_483_648;

pub(crate) fn new_writer() -> Result<Writer<Cursor<Vec<u8>>>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(writer)
}

/// `<tag xmlns:a xmlns:r xmlns:p ...>`
pub(crate) fn write_root<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    extra: &[(&str, &str)],
) -> Result<()> {
    let mut attrs: Vec<(&str, &str)> = presentation_namespaces();
    attrs.extend_from_slice(extra);
    xml::write_start(writer, tag, &attrs)
}

/// The non-visual header every shape tree starts with
pub(crate) fn write_tree_header<W: Write>(writer: &mut Writer<W>) -> Result<()> {
    xml::write_start(writer, "p:nvGrpSpPr", &[])?;
    xml::write_empty(writer, "p:cNvPr", &[("id", "1"), ("name", "")])?;
    xml::write_empty(writer, "p:cNvGrpSpPr", &[])?;
    xml::write_empty(writer, "p:nvPr", &[])?;
    xml::write_end(writer, "p:nvGrpSpPr")?;

    xml::write_start(writer, "p:grpSpPr", &[])?;
    xml::write_start(writer, "a:xfrm", &[])?;
    xml::write_empty(writer, "a:off", &[("x", "0"), ("y", "0")])?;
    xml::write_empty(writer, "a:ext", &[("cx", "0"), ("cy", "0")])?;
    xml::write_empty(writer, "a:chOff", &[("x", "0"), ("y", "0")])?;
    xml::write_empty(writer, "a:chExt", &[("cx", "0"), ("cy", "0")])?;
    xml::write_end(writer, "a:xfrm")?;
    xml::write_end(writer, "p:grpSpPr")
}

fn write_empty_tree<W: Write>(writer: &mut Writer<W>, name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => xml::write_start(writer, "p:cSld", &[("name", name)])?,
        None => xml::write_start(writer, "p:cSld", &[])?,
    }
    xml::write_start(writer, "p:spTree", &[])?;
    write_tree_header(writer)?;
    xml::write_end(writer, "p:spTree")?;
    xml::write_end(writer, "p:cSld")
}

/// slideMaster1.xml; `layout_rels` are the master's relationship IDs of each layout
pub fn slide_master_xml(layout_rels: &[String]) -> Result<Vec<u8>> {
    let mut writer = new_writer()?;
    write_root(&mut writer, "p:sldMaster", &[])?;
    write_empty_tree(&mut writer, None)?;

    xml::write_empty(
        &mut writer,
        "p:clrMap",
        &[
            ("bg1", "lt1"),
            ("tx1", "dk1"),
            ("bg2", "lt2"),
            ("tx2", "dk2"),
            ("accent1", "accent1"),
            ("accent2", "accent2"),
            ("accent3", "accent3"),
            ("accent4", "accent4"),
            ("accent5", "accent5"),
            ("accent6", "accent6"),
            ("hlink", "hlink"),
            ("folHlink", "folHlink"),
        ],
    )?;

    xml::write_start(&mut writer, "p:sldLayoutIdLst", &[])?;
    for (i, rel_id) in layout_rels.iter().enumerate() {
        let id = (MASTER_ID + 1 + i as u64).to_string();
        xml::write_empty(
            &mut writer,
            "p:sldLayoutId",
            &[("id", id.as_str()), ("r:id", rel_id.as_str())],
        )?;
    }
    xml::write_end(&mut writer, "p:sldLayoutIdLst")?;

    xml::write_end(&mut writer, "p:sldMaster")?;
    Ok(writer.into_inner().into_inner())
}

/// A placeholder-free layout
pub fn slide_layout_xml(name: &str, kind: &str) -> Result<Vec<u8>> {
    let mut writer = new_writer()?;
    write_root(&mut writer, "p:sldLayout", &[("type", kind), ("preserve", "1")])?;
    write_empty_tree(&mut writer, Some(name))?;
    xml::write_start(&mut writer, "p:clrMapOvr", &[])?;
    xml::write_empty(&mut writer, "a:masterClrMapping", &[])?;
    xml::write_end(&mut writer, "p:clrMapOvr")?;
    xml::write_end(&mut writer, "p:sldLayout")?;
    Ok(writer.into_inner().into_inner())
}

pub fn master_id() -> String {
    MASTER_ID.to_string()
}

pub fn table_styles_xml() -> Vec<u8> {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><a:tblStyleLst xmlns:a="{}" def="{}"/>"#,
        xml::A,
        DEFAULT_TABLE_STYLE
    )
    .into_bytes()
}

/// theme1.xml: Office colours and fonts with the three required style levels
pub fn theme_xml() -> &'static [u8] {
    THEME.as_bytes()
}

const THEME: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">"#,
    r#"<a:themeElements>"#,
    r#"<a:clrScheme name="Office">"#,
    r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#,
    r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#,
    r#"<a:dk2><a:srgbClr val="1F497D"/></a:dk2>"#,
    r#"<a:lt2><a:srgbClr val="EEECE1"/></a:lt2>"#,
    r#"<a:accent1><a:srgbClr val="4F81BD"/></a:accent1>"#,
    r#"<a:accent2><a:srgbClr val="C0504D"/></a:accent2>"#,
    r#"<a:accent3><a:srgbClr val="9BBB59"/></a:accent3>"#,
    r#"<a:accent4><a:srgbClr val="8064A2"/></a:accent4>"#,
    r#"<a:accent5><a:srgbClr val="4BACC6"/></a:accent5>"#,
    r#"<a:accent6><a:srgbClr val="F79646"/></a:accent6>"#,
    r#"<a:hlink><a:srgbClr val="0000FF"/></a:hlink>"#,
    r#"<a:folHlink><a:srgbClr val="800080"/></a:folHlink>"#,
    r#"</a:clrScheme>"#,
    r#"<a:fontScheme name="Office">"#,
    r#"<a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
    r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
    r#"</a:fontScheme>"#,
    r#"<a:fmtScheme name="Office">"#,
    r#"<a:fillStyleLst>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"><a:tint val="50000"/></a:schemeClr></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"><a:shade val="80000"/></a:schemeClr></a:solidFill>"#,
    r#"</a:fillStyleLst>"#,
    r#"<a:lnStyleLst>"#,
    r#"<a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"<a:ln w="25400"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"<a:ln w="38100"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"</a:lnStyleLst>"#,
    r#"<a:effectStyleLst>"#,
    r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#,
    r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#,
    r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#,
    r#"</a:effectStyleLst>"#,
    r#"<a:bgFillStyleLst>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"><a:tint val="95000"/></a:schemeClr></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"><a:shade val="90000"/></a:schemeClr></a:solidFill>"#,
    r#"</a:bgFillStyleLst>"#,
    r#"</a:fmtScheme>"#,
    r#"</a:themeElements>"#,
    r#"<a:objectDefaults/><a:extraClrSchemeLst/>"#,
    r#"</a:theme>"#,
);
