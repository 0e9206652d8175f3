//! Paragraph element (w:p)

use crate::document::Run;
use crate::error::Result;
use crate::xml::{collect_attributes, get_w_val, RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

/// Paragraph element (w:p)
#[derive(Clone, Debug, Default)]
pub struct Paragraph {
    pub properties: Option<ParagraphProperties>,
    pub content: Vec<ParagraphContent>,
    /// Attributes such as `w:rsidR`, kept for round-trip
    pub unknown_attrs: Vec<(String, String)>,
}

/// Content within a paragraph
#[derive(Clone, Debug)]
pub enum ParagraphContent {
    Run(Run),
    /// Hyperlinks, bookmarks, fields and the like, preserved
    Unknown(RawXmlNode),
}

/// Horizontal alignment of a paragraph (w:jc)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub fn parse(s: &str) -> Self {
        match s {
            "center" => Alignment::Center,
            "right" | "end" => Alignment::Right,
            "both" | "distribute" => Alignment::Justify,
            _ => Alignment::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }
}

/// Paragraph properties (w:pPr)
#[derive(Clone, Debug, Default)]
pub struct ParagraphProperties {
    /// Paragraph style ID
    pub style: Option<String>,
    /// Raw `w:jc` value
    pub justification: Option<String>,
    pub unknown_children: Vec<RawXmlNode>,
}

impl Paragraph {
    /// Create a paragraph holding one run of `text`
    pub fn new(text: impl Into<String>) -> Self {
        Paragraph {
            content: vec![ParagraphContent::Run(Run::new(text))],
            ..Default::default()
        }
    }

    /// Create a paragraph of `text` in the given style
    pub fn styled(text: impl Into<String>, style: impl Into<String>) -> Self {
        let mut para = Paragraph::new(text);
        para.set_style(style);
        para
    }

    /// Parse from reader (after w:p start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        let mut para = Paragraph {
            unknown_attrs: collect_attributes(start),
            ..Default::default()
        };
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"pPr" => {
                        para.properties = Some(ParagraphProperties::from_reader(reader)?);
                    }
                    b"r" => {
                        let run = Run::from_reader(reader, &e)?;
                        para.content.push(ParagraphContent::Run(run));
                    }
                    _ => {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        para.content.push(ParagraphContent::Unknown(RawXmlNode::Element(raw)));
                    }
                },
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"r" => para.content.push(ParagraphContent::Run(Run::from_empty(&e))),
                    _ => {
                        let raw = RawXmlElement::from_empty(&e);
                        para.content.push(ParagraphContent::Unknown(RawXmlNode::Element(raw)));
                    }
                },
                Event::End(e) if e.name().local_name().as_ref() == b"p" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(para)
    }

    /// Create from a self-closing `<w:p/>`
    pub fn from_empty(start: &BytesStart) -> Self {
        Paragraph {
            unknown_attrs: collect_attributes(start),
            ..Default::default()
        }
    }

    /// Text of all runs
    pub fn text(&self) -> String {
        self.runs().map(|r| r.text()).collect()
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.content.iter().filter_map(|c| match c {
            ParagraphContent::Run(r) => Some(r),
            _ => None,
        })
    }

    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut Run> {
        self.content.iter_mut().filter_map(|c| match c {
            ParagraphContent::Run(r) => Some(r),
            _ => None,
        })
    }

    pub fn add_run(&mut self, run: Run) {
        self.content.push(ParagraphContent::Run(run));
    }

    /// Style ID
    pub fn style(&self) -> Option<&str> {
        self.properties.as_ref()?.style.as_deref()
    }

    pub fn set_style(&mut self, style: impl Into<String>) {
        self.properties.get_or_insert_with(Default::default).style = Some(style.into());
    }

    /// Alignment, if set on the paragraph itself
    pub fn alignment(&self) -> Option<Alignment> {
        let jc = self.properties.as_ref()?.justification.as_deref()?;
        Some(Alignment::parse(jc))
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.properties.get_or_insert_with(Default::default).justification =
            Some(alignment.as_str().to_string());
    }

    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new("w:p");
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
            match content {
                ParagraphContent::Run(run) => run.write_to(writer)?,
                ParagraphContent::Unknown(node) => node.write_to(writer)?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new("w:p")))?;
        Ok(())
    }
}

impl ParagraphProperties {
    /// Parse from reader (after w:pPr start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut props = ParagraphProperties::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let raw = RawXmlElement::from_reader(reader, &e)?;
                    props.unknown_children.push(RawXmlNode::Element(raw));
                }
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"pStyle" => props.style = get_w_val(&e),
                    b"jc" => props.justification = get_w_val(&e),
                    _ => {
                        let raw = RawXmlElement::from_empty(&e);
                        props.unknown_children.push(RawXmlNode::Element(raw));
                    }
                },
                Event::End(e) if e.name().local_name().as_ref() == b"pPr" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(props)
    }

    /// Children are written in schema order: pStyle, the preserved middle, then jc.
    /// Preserved children that follow jc in the schema (rPr, sectPr) go last.
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        if self.style.is_none() && self.justification.is_none() && self.unknown_children.is_empty()
        {
            return Ok(());
        }

        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;

        if let Some(style) = &self.style {
            let mut elem = BytesStart::new("w:pStyle");
            elem.push_attribute(("w:val", style.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        let (trailing, leading): (Vec<_>, Vec<_>) =
            self.unknown_children.iter().partition(|node| {
                node.as_element()
                    .map(|e| AFTER_JC.contains(&e.name.as_str()))
                    .unwrap_or(false)
            });

        for child in leading {
            child.write_to(writer)?;
        }

        if let Some(jc) = &self.justification {
            let mut elem = BytesStart::new("w:jc");
            elem.push_attribute(("w:val", jc.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        for child in trailing {
            child.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
        Ok(())
    }
}

/// pPr children the schema places after w:jc
const AFTER_JC: [&str; 8] = [
    "w:textDirection",
    "w:textAlignment",
    "w:textboxTightWrap",
    "w:outlineLvl",
    "w:divId",
    "w:cnfStyle",
    "w:rPr",
    "w:sectPr",
];
