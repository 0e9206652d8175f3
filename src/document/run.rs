//! Run element (w:r): text or a picture with uniform formatting

use crate::document::InlinePicture;
use crate::error::Result;
use crate::xml::{collect_attributes, get_attr, get_w_val, parse_bool, RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

/// Run element (w:r)
#[derive(Clone, Debug, Default)]
pub struct Run {
    pub properties: Option<RunProperties>,
    pub content: Vec<RunContent>,
    /// Attributes such as `w:rsidR`, kept for round-trip
    pub unknown_attrs: Vec<(String, String)>,
}

/// Content within a run
#[derive(Clone, Debug)]
pub enum RunContent {
    /// Text (w:t)
    Text(String),
    /// Tab (w:tab)
    Tab,
    /// Break (w:br)
    Break(BreakType),
    /// Carriage return (w:cr)
    CarriageReturn,
    /// Inline picture (w:drawing)
    Drawing(InlinePicture),
    /// Anything else, preserved
    Unknown(RawXmlNode),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BreakType {
    #[default]
    TextWrapping,
    Page,
    Column,
}

/// Run properties (w:rPr)
#[derive(Clone, Debug, Default)]
pub struct RunProperties {
    /// Character style ID
    pub style: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    /// Half-points, e.g. 24 = 12pt
    pub size: Option<u32>,
    /// `RRGGBB`
    pub color: Option<String>,
    pub unknown_children: Vec<RawXmlNode>,
}

impl Run {
    /// Create a run holding `text`
    pub fn new(text: impl Into<String>) -> Self {
        Run {
            content: vec![RunContent::Text(text.into())],
            ..Default::default()
        }
    }

    /// Create a run holding a single inline picture
    pub fn picture(picture: InlinePicture) -> Self {
        Run {
            content: vec![RunContent::Drawing(picture)],
            ..Default::default()
        }
    }

    /// Parse from reader (after w:r start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        let mut run = Run {
            unknown_attrs: collect_attributes(start),
            ..Default::default()
        };
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"rPr" => {
                        run.properties = Some(RunProperties::from_reader(reader)?);
                    }
                    b"t" => {
                        let text = read_text_content(reader)?;
                        run.content.push(RunContent::Text(text));
                    }
                    b"drawing" => {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        run.content.push(match InlinePicture::from_drawing(&raw) {
                            Some(pic) => RunContent::Drawing(pic),
                            None => RunContent::Unknown(RawXmlNode::Element(raw)),
                        });
                    }
                    _ => {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        run.content.push(RunContent::Unknown(RawXmlNode::Element(raw)));
                    }
                },
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"t" => run.content.push(RunContent::Text(String::new())),
                    b"tab" => run.content.push(RunContent::Tab),
                    b"br" => {
                        let kind = match get_attr(&e, "w:type").as_deref() {
                            Some("page") => BreakType::Page,
                            Some("column") => BreakType::Column,
                            _ => BreakType::TextWrapping,
                        };
                        run.content.push(RunContent::Break(kind));
                    }
                    b"cr" => run.content.push(RunContent::CarriageReturn),
                    _ => {
                        let raw = RawXmlElement::from_empty(&e);
                        run.content.push(RunContent::Unknown(RawXmlNode::Element(raw)));
                    }
                },
                Event::End(e) if e.name().local_name().as_ref() == b"r" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(run)
    }

    /// Create from a self-closing `<w:r/>`
    pub fn from_empty(start: &BytesStart) -> Self {
        Run {
            unknown_attrs: collect_attributes(start),
            ..Default::default()
        }
    }

    /// Plain text of this run; pictures contribute nothing
    pub fn text(&self) -> String {
        let mut result = String::new();
        for content in &self.content {
            match content {
                RunContent::Text(t) => result.push_str(t),
                RunContent::Tab => result.push('\t'),
                RunContent::Break(BreakType::TextWrapping) | RunContent::CarriageReturn => {
                    result.push('\n')
                }
                _ => {}
            }
        }
        result
    }

    /// Inline pictures in this run
    pub fn pictures(&self) -> impl Iterator<Item = &InlinePicture> {
        self.content.iter().filter_map(|c| match c {
            RunContent::Drawing(pic) => Some(pic),
            _ => None,
        })
    }

    pub fn bold(&self) -> bool {
        self.properties.as_ref().and_then(|p| p.bold).unwrap_or(false)
    }

    pub fn italic(&self) -> bool {
        self.properties.as_ref().and_then(|p| p.italic).unwrap_or(false)
    }

    /// Font size in points, if set on the run
    pub fn font_size_pt(&self) -> Option<f32> {
        self.properties.as_ref()?.size.map(|s| s as f32 / 2.0)
    }

    /// `RRGGBB`, if set on the run
    pub fn color(&self) -> Option<&str> {
        self.properties.as_ref()?.color.as_deref()
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.properties.get_or_insert_with(Default::default).bold = Some(bold);
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.properties.get_or_insert_with(Default::default).italic = Some(italic);
    }

    /// Rounded to the nearest half-point
    pub fn set_font_size_pt(&mut self, size: f32) {
        self.properties.get_or_insert_with(Default::default).size =
            Some((size * 2.0).round() as u32);
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.properties.get_or_insert_with(Default::default).color = Some(color.into());
    }

    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new("w:r");
        for (key, value) in &self.unknown_attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.properties.is_none() && self.content.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(props) = &self.properties {
            props.write_to(writer)?;
        }
        for content in &self.content {
            content.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:r")))?;
        Ok(())
    }
}

impl RunContent {
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        match self {
            RunContent::Text(text) => {
                let mut start = BytesStart::new("w:t");
                if text.starts_with(' ') || text.ends_with(' ') || text.contains("  ") {
                    start.push_attribute(("xml:space", "preserve"));
                }
                writer.write_event(Event::Start(start))?;
                writer.write_event(Event::Text(BytesText::new(text)))?;
                writer.write_event(Event::End(BytesEnd::new("w:t")))?;
            }
            RunContent::Tab => {
                writer.write_event(Event::Empty(BytesStart::new("w:tab")))?;
            }
            RunContent::Break(kind) => {
                let mut start = BytesStart::new("w:br");
                match kind {
                    BreakType::Page => start.push_attribute(("w:type", "page")),
                    BreakType::Column => start.push_attribute(("w:type", "column")),
                    BreakType::TextWrapping => {}
                }
                writer.write_event(Event::Empty(start))?;
            }
            RunContent::CarriageReturn => {
                writer.write_event(Event::Empty(BytesStart::new("w:cr")))?;
            }
            RunContent::Drawing(pic) => pic.write_to(writer)?,
            RunContent::Unknown(node) => node.write_to(writer)?,
        }
        Ok(())
    }
}

impl RunProperties {
    /// Parse from reader (after w:rPr start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut props = RunProperties::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let raw = RawXmlElement::from_reader(reader, &e)?;
                    props.unknown_children.push(RawXmlNode::Element(raw));
                }
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"rStyle" => props.style = get_w_val(&e),
                    b"b" => props.bold = Some(parse_bool(&e)),
                    b"i" => props.italic = Some(parse_bool(&e)),
                    b"sz" => props.size = get_w_val(&e).and_then(|v| v.parse().ok()),
                    b"color" => props.color = get_w_val(&e),
                    _ => {
                        let raw = RawXmlElement::from_empty(&e);
                        props.unknown_children.push(RawXmlNode::Element(raw));
                    }
                },
                Event::End(e) if e.name().local_name().as_ref() == b"rPr" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(props)
    }

    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let has_content = self.style.is_some()
            || self.bold.is_some()
            || self.italic.is_some()
            || self.size.is_some()
            || self.color.is_some()
            || !self.unknown_children.is_empty();
        if !has_content {
            return Ok(());
        }

        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;

        if let Some(style) = &self.style {
            let mut elem = BytesStart::new("w:rStyle");
            elem.push_attribute(("w:val", style.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        for (name, value) in [("w:b", self.bold), ("w:i", self.italic)] {
            if let Some(on) = value {
                let mut elem = BytesStart::new(name);
                if !on {
                    elem.push_attribute(("w:val", "0"));
                }
                writer.write_event(Event::Empty(elem))?;
            }
        }

        // Schema order puts color before sz
        if let Some(color) = &self.color {
            let mut elem = BytesStart::new("w:color");
            elem.push_attribute(("w:val", color.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        if let Some(size) = self.size {
            let mut elem = BytesStart::new("w:sz");
            elem.push_attribute(("w:val", size.to_string().as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        for child in &self.unknown_children {
            child.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
        Ok(())
    }
}

/// Read the text of a w:t element
fn read_text_content<R: BufRead>(reader: &mut Reader<R>) -> Result<String> {
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::End(e) if e.name().local_name().as_ref() == b"t" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_run(xml: &str) -> Run {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf).unwrap() {
                Event::Start(e) => {
                    let e = e.into_owned();
                    return Run::from_reader(&mut reader, &e).unwrap();
                }
                Event::Eof => panic!("no run"),
                _ => {}
            }
        }
    }

    fn write(run: &Run) -> String {
        let mut writer = Writer::new(Vec::new());
        run.write_to(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_parse_formatting() {
        let run = parse_run(
            r#"<w:r><w:rPr><w:b/><w:i w:val="0"/><w:sz w:val="28"/><w:color w:val="70B658"/><w:u w:val="single"/></w:rPr><w:t xml:space="preserve"> Hi </w:t><w:tab/><w:t>there</w:t></w:r>"#,
        );
        assert!(run.bold());
        assert!(!run.italic());
        assert_eq!(run.font_size_pt(), Some(14.0));
        assert_eq!(run.color(), Some("70B658"));
        assert_eq!(run.text(), " Hi \tthere");
        // w:u is not modelled but survives
        assert!(write(&run).contains(r#"<w:u w:val="single"/>"#));
    }

    #[test]
    fn test_write_preserves_spaces() {
        let xml = write(&Run::new("  padded"));
        assert_eq!(xml, r#"<w:r><w:t xml:space="preserve">  padded</w:t></w:r>"#);
    }

    #[test]
    fn test_set_properties() {
        let mut run = Run::new("x");
        run.set_bold(true);
        run.set_font_size_pt(10.5);
        run.set_color("FF0000");
        assert_eq!(
            write(&run),
            r#"<w:r><w:rPr><w:b/><w:color w:val="FF0000"/><w:sz w:val="21"/></w:rPr><w:t>x</w:t></w:r>"#
        );
    }

    #[test]
    fn test_picture_run() {
        use crate::units::Length;
        let run = Run::picture(InlinePicture::new("rId4", Length::cm(1.0), Length::cm(1.0), 1));
        let reparsed = parse_run(&write(&run));
        let pics: Vec<_> = reparsed.pictures().collect();
        assert_eq!(pics.len(), 1);
        assert_eq!(pics[0].rel_id, "rId4");
        assert_eq!(reparsed.text(), "");
    }
}
