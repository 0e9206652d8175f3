//! Presentation model: slides, shapes and package assembly
//!
//! A [`Presentation`] starts from a built-in master with the eleven stock
//! layouts and a plain Office theme. Slides are only serialized when the
//! presentation is saved.

mod shape;
mod slide;
mod template;

pub use shape::{Bounds, Geometry, Shape, ShapeKind, SlideTable, TextFrame, TextParagraph, TextRun};
pub use slide::Slide;
pub use template::{BLANK_LAYOUT, LAYOUTS};

use crate::error::{Error, Result};
use crate::opc::{
    rel_types, Package, Part, PartUri, Relationships, PRESENTATION, SLIDE, SLIDE_LAYOUT,
    SLIDE_MASTER, TABLE_STYLES, THEME,
};
use crate::units::Length;
use crate::xml;
use log::debug;
use std::path::Path;

/// First `p:sldId/@id`
const FIRST_SLIDE_ID: u32 = 256;

/// A PPTX presentation
#[derive(Clone, Debug)]
pub struct Presentation {
    slides: Vec<Slide>,
    slide_width: Length,
    slide_height: Length,
}

impl Presentation {
    /// An empty 10" x 7.5" presentation
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            slide_width: Length::emu(9_144_000),
            slide_height: Length::emu(6_858_000),
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slide_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn layout_names(&self) -> impl Iterator<Item = &'static str> {
        LAYOUTS.iter().map(|(name, _)| *name)
    }

    /// Append a slide based on the layout at `layout`
    pub fn add_slide(&mut self, layout: usize) -> Result<&mut Slide> {
        if layout >= LAYOUTS.len() {
            return Err(Error::LayoutNotFound(layout));
        }
        let id = FIRST_SLIDE_ID + self.slides.len() as u32;
        let index = self.slides.len();
        self.slides.push(Slide::new(id, layout));
        debug!("added slide {} with layout '{}'", id, LAYOUTS[layout].0);
        Ok(&mut self.slides[index])
    }

    pub fn slide_width(&self) -> Length {
        self.slide_width
    }

    pub fn slide_height(&self) -> Length {
        self.slide_height
    }

    pub fn set_slide_size(&mut self, width: Length, height: Length) {
        self.slide_width = width;
        self.slide_height = height;
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_package()?.save(path)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_package()?.to_bytes()
    }

    /// Assemble every part of the presentation into a package
    pub fn to_package(&self) -> Result<Package> {
        let mut package = Package::new();
        let mut pres_rels = Relationships::new();

        let master_rel = pres_rels.add(rel_types::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
        pres_rels.add(rel_types::THEME, "theme/theme1.xml");
        pres_rels.add(rel_types::TABLE_STYLES, "tableStyles.xml");

        // master, layouts, theme
        let mut master_rels = Relationships::new();
        let mut layout_rel_ids = Vec::with_capacity(LAYOUTS.len());
        for (i, (name, kind)) in LAYOUTS.iter().enumerate() {
            let n = i + 1;
            layout_rel_ids.push(
                master_rels.add(rel_types::SLIDE_LAYOUT, &format!("../slideLayouts/slideLayout{n}.xml")),
            );
            let mut rels = Relationships::new();
            rels.add(rel_types::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
            let uri = PartUri::new(&format!("/ppt/slideLayouts/slideLayout{n}.xml"))?;
            package.add_part(
                Part::new(uri, SLIDE_LAYOUT, template::slide_layout_xml(name, kind)?)
                    .with_relationships(rels),
            );
        }
        master_rels.add(rel_types::THEME, "../theme/theme1.xml");
        package.add_part(
            Part::new(
                PartUri::new("/ppt/slideMasters/slideMaster1.xml")?,
                SLIDE_MASTER,
                template::slide_master_xml(&layout_rel_ids)?,
            )
            .with_relationships(master_rels),
        );
        package.add_part(Part::new(
            PartUri::new("/ppt/theme/theme1.xml")?,
            THEME,
            template::theme_xml().to_vec(),
        ));
        package.add_part(Part::new(
            PartUri::new("/ppt/tableStyles.xml")?,
            TABLE_STYLES,
            template::table_styles_xml(),
        ));

        // slides and their pictures
        let mut media_count = 0;
        let mut slide_rel_ids = Vec::with_capacity(self.slides.len());
        for (i, slide) in self.slides.iter().enumerate() {
            let n = i + 1;
            let mut rels = Relationships::new();
            rels.add(
                rel_types::SLIDE_LAYOUT,
                &format!("../slideLayouts/slideLayout{}.xml", slide.layout_index() + 1),
            );

            let mut image_rels = Vec::new();
            for picture in slide.pictures() {
                media_count += 1;
                let format = picture.format();
                let name = format!("image{}.{}", media_count, format.extension());
                package
                    .content_types_mut()
                    .add_default(format.extension(), format.mime_type());
                package.add_part(Part::new(
                    PartUri::new(&format!("/ppt/media/{name}"))?,
                    format.mime_type(),
                    picture.data().to_vec(),
                ));
                image_rels.push(rels.add(rel_types::IMAGE, &format!("../media/{name}")));
            }

            let uri = PartUri::new(&format!("/ppt/slides/slide{n}.xml"))?;
            package.add_part(Part::new(uri, SLIDE, slide.to_xml(&image_rels)?).with_relationships(rels));
            slide_rel_ids.push(pres_rels.add(rel_types::SLIDE, &format!("slides/slide{n}.xml")));
        }

        let uri = PartUri::new("/ppt/presentation.xml")?;
        let xml = self.presentation_xml(&master_rel, &slide_rel_ids)?;
        package.add_part(Part::new(uri.clone(), PRESENTATION, xml).with_relationships(pres_rels));
        package
            .relationships_mut()
            .add(rel_types::OFFICE_DOCUMENT, uri.zip_name());

        debug!(
            "assembled presentation with {} slides and {} pictures",
            self.slides.len(),
            media_count
        );
        Ok(package)
    }

    fn presentation_xml(&self, master_rel: &str, slide_rels: &[String]) -> Result<Vec<u8>> {
        let mut writer = template::new_writer()?;
        template::write_root(&mut writer, "p:presentation", &[("saveSubsetFonts", "1")])?;

        let master_id = template::master_id();
        xml::write_start(&mut writer, "p:sldMasterIdLst", &[])?;
        xml::write_empty(
            &mut writer,
            "p:sldMasterId",
            &[("id", master_id.as_str()), ("r:id", master_rel)],
        )?;
        xml::write_end(&mut writer, "p:sldMasterIdLst")?;

        if !self.slides.is_empty() {
            xml::write_start(&mut writer, "p:sldIdLst", &[])?;
            for (slide, rel_id) in self.slides.iter().zip(slide_rels) {
                let id = slide.id().to_string();
                xml::write_empty(
                    &mut writer,
                    "p:sldId",
                    &[("id", id.as_str()), ("r:id", rel_id.as_str())],
                )?;
            }
            xml::write_end(&mut writer, "p:sldIdLst")?;
        }

        let (cx, cy) = (self.slide_width.to_string(), self.slide_height.to_string());
        xml::write_empty(&mut writer, "p:sldSz", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
        xml::write_empty(&mut writer, "p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;
        xml::write_end(&mut writer, "p:presentation")?;
        Ok(writer.into_inner().into_inner())
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picture::Picture;
    use pretty_assertions::assert_eq;

    fn part_text(package: &Package, uri: &str) -> String {
        let part = package.part(&PartUri::new(uri).unwrap()).unwrap();
        part.data_as_str().unwrap().to_string()
    }

    #[test]
    fn test_new_presentation() {
        let prs = Presentation::new();
        assert_eq!(prs.slide_count(), 0);
        assert_eq!(prs.slide_width().as_emu(), 9_144_000);
        assert_eq!(prs.layout_names().nth(BLANK_LAYOUT), Some("Blank"));
    }

    #[test]
    fn test_unknown_layout() {
        let mut prs = Presentation::new();
        assert!(matches!(prs.add_slide(11), Err(Error::LayoutNotFound(11))));
        assert_eq!(prs.slide_count(), 0);
    }

    #[test]
    fn test_package_parts() {
        let mut prs = Presentation::new();
        prs.set_slide_size(Length::cm(26.0), Length::cm(15.0));
        prs.add_slide(BLANK_LAYOUT).unwrap();
        let slide = prs.add_slide(0).unwrap();
        let png = crate::picture::tests::png(8, 4);
        slide.add_picture(Picture::from_bytes(png).unwrap(), Bounds::default());

        let package = prs.to_package().unwrap();
        let main = package.main_part().unwrap();
        assert_eq!(main.uri().as_str(), "/ppt/presentation.xml");

        let pres = part_text(&package, "/ppt/presentation.xml");
        assert!(pres.contains(r#"<p:sldSz cx="9360000" cy="5400000"/>"#));
        assert!(pres.contains(r#"<p:sldId id="256""#));
        assert!(pres.contains(r#"<p:sldId id="257""#));

        let slides = package.related_parts(main, rel_types::SLIDE);
        assert_eq!(slides.len(), 2);
        let layout = package.related_parts(slides[0], rel_types::SLIDE_LAYOUT);
        assert_eq!(layout[0].uri().as_str(), "/ppt/slideLayouts/slideLayout7.xml");

        let images = package.related_parts(slides[1], rel_types::IMAGE);
        assert_eq!(images[0].uri().as_str(), "/ppt/media/image1.png");
        assert_eq!(images[0].content_type(), "image/png");
        assert_eq!(package.content_types().get(images[0].uri()), Some("image/png"));
    }

    #[test]
    fn test_round_trip_through_bytes() {
        let mut prs = Presentation::new();
        prs.add_slide(BLANK_LAYOUT)
            .unwrap()
            .add_text_box(Bounds::cm(1.0, 1.0, 5.0, 1.0), TextFrame::new("Hello"));
        let package = Package::from_bytes(&prs.to_bytes().unwrap()).unwrap();
        assert!(part_text(&package, "/ppt/slides/slide1.xml").contains("<a:t>Hello</a:t>"));
        let master = package
            .part(&PartUri::new("/ppt/slideMasters/slideMaster1.xml").unwrap())
            .unwrap();
        assert_eq!(package.related_parts(master, rel_types::SLIDE_LAYOUT).len(), 11);
    }
}
