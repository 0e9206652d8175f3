//! OPC package: reading and writing the ZIP container

use crate::error::{Error, Result};
use crate::opc::relationships::rel_types;
use crate::opc::{ContentTypes, Part, PartUri, Relationships};
use log::debug;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;
use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

const CONTENT_TYPES_NAME: &str = "[Content_Types].xml";
const PACKAGE_RELS_NAME: &str = "_rels/.rels";

/// A ZIP-based OPC package (DOCX, PPTX, ...)
#[derive(Debug)]
pub struct Package {
    /// Ordered by name so output is reproducible
    parts: BTreeMap<PartUri, Part>,
    relationships: Relationships,
    content_types: ContentTypes,
}

impl Package {
    pub fn new() -> Self {
        Self {
            parts: BTreeMap::new(),
            relationships: Relationships::new(),
            content_types: ContentTypes::new(),
        }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let content_types = {
            let mut file = archive
                .by_name(CONTENT_TYPES_NAME)
                .map_err(|_| Error::MissingPart(CONTENT_TYPES_NAME.into()))?;
            let mut xml = String::new();
            file.read_to_string(&mut xml)?;
            ContentTypes::from_xml(&xml)?
        };

        let mut package = Self {
            parts: BTreeMap::new(),
            relationships: Relationships::new(),
            content_types,
        };

        // .rels files are collected first and attached once every part is known
        let mut rels_files = Vec::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();
            if name.ends_with('/') || name == CONTENT_TYPES_NAME {
                continue;
            }

            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            let uri = PartUri::new(&name)?;

            if uri.is_relationships() {
                rels_files.push((uri, data));
                continue;
            }

            let content_type = package
                .content_types
                .get(&uri)
                .unwrap_or("application/octet-stream")
                .to_string();
            package.parts.insert(uri.clone(), Part::new(uri, content_type, data));
        }

        for (rels_uri, data) in rels_files {
            let rels = Relationships::from_xml(std::str::from_utf8(&data)?)?;
            if rels_uri.zip_name() == PACKAGE_RELS_NAME {
                package.relationships = rels;
                continue;
            }
            let owner = package
                .parts
                .values_mut()
                .find(|p| p.uri().relationships_uri() == rels_uri);
            if let Some(part) = owner {
                part.set_relationships(rels);
            }
        }

        debug!("read package with {} parts", package.parts.len());
        Ok(package)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_to(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file(CONTENT_TYPES_NAME, options)?;
        self.content_types.write_to(&mut zip)?;

        if !self.relationships.is_empty() {
            zip.start_file(PACKAGE_RELS_NAME, options)?;
            self.relationships.write_to(&mut zip)?;
        }

        for (uri, part) in &self.parts {
            zip.start_file(uri.zip_name(), options)?;
            zip.write_all(part.data())?;

            if let Some(rels) = part.relationships().filter(|r| !r.is_empty()) {
                zip.start_file(uri.relationships_uri().zip_name(), options)?;
                rels.write_to(&mut zip)?;
            }
        }

        zip.finish()?;
        debug!("wrote package with {} parts", self.parts.len());
        Ok(())
    }

    pub fn part(&self, uri: &PartUri) -> Option<&Part> {
        self.parts.get(uri)
    }

    pub fn part_mut(&mut self, uri: &PartUri) -> Option<&mut Part> {
        self.parts.get_mut(uri)
    }

    /// Insert or replace a part, registering an override unless the extension default already fits
    pub fn add_part(&mut self, part: Part) {
        let uri = part.uri().clone();
        if self.content_types.get(&uri) != Some(part.content_type()) {
            self.content_types.add_override(&uri, part.content_type());
        }
        self.parts.insert(uri, part);
    }

    pub fn remove_part(&mut self, uri: &PartUri) -> Option<Part> {
        self.content_types.remove_override(uri);
        self.parts.remove(uri)
    }

    pub fn parts(&self) -> impl Iterator<Item = (&PartUri, &Part)> {
        self.parts.iter()
    }

    pub fn part_uris(&self) -> impl Iterator<Item = &PartUri> {
        self.parts.keys()
    }

    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    pub fn relationships_mut(&mut self) -> &mut Relationships {
        &mut self.relationships
    }

    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    pub fn content_types_mut(&mut self) -> &mut ContentTypes {
        &mut self.content_types
    }

    /// Target part of the first package relationship of `rel_type`
    pub fn part_by_rel_type(&self, rel_type: &str) -> Option<&Part> {
        let rel = self.relationships.by_type(rel_type)?;
        let uri = PartUri::new(&rel.target).ok()?;
        self.parts.get(&uri)
    }

    /// The officeDocument part (`word/document.xml`, `ppt/presentation.xml`)
    pub fn main_part(&self) -> Option<&Part> {
        self.part_by_rel_type(rel_types::OFFICE_DOCUMENT)
    }

    pub fn main_part_mut(&mut self) -> Option<&mut Part> {
        let rel = self.relationships.by_type(rel_types::OFFICE_DOCUMENT)?;
        let uri = PartUri::new(&rel.target).ok()?;
        self.parts.get_mut(&uri)
    }

    /// Parts reached from `source` through relationships of `rel_type`, in relationship order
    pub fn related_parts<'a>(&'a self, source: &'a Part, rel_type: &'a str) -> Vec<&'a Part> {
        let Some(rels) = source.relationships() else {
            return Vec::new();
        };
        rels.all_by_type(rel_type)
            .filter_map(|rel| source.uri().resolve(&rel.target).ok())
            .filter_map(|uri| self.parts.get(&uri))
            .collect()
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::{MAIN_DOCUMENT, SLIDE};

    #[test]
    fn test_new_package_is_empty() {
        let pkg = Package::new();
        assert_eq!(pkg.parts().count(), 0);
        assert!(pkg.relationships().is_empty());
        assert!(pkg.main_part().is_none());
    }

    #[test]
    fn test_empty_package_survives_a_save() {
        let bytes = Package::new().to_bytes().unwrap();
        assert_eq!(&bytes[0..2], b"PK");
        assert_eq!(Package::from_bytes(&bytes).unwrap().parts().count(), 0);
    }

    #[test]
    fn test_missing_content_types_is_reported() {
        let mut cursor = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(&mut cursor);
        zip.start_file("word/document.xml", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"<w:document/>").unwrap();
        zip.finish().unwrap();

        let err = Package::from_bytes(cursor.get_ref()).unwrap_err();
        assert!(matches!(err, Error::MissingPart(_)));
    }

    #[test]
    fn test_parts_and_relationships_survive_a_save() {
        let mut pkg = Package::new();

        let pres_uri = PartUri::new("/ppt/presentation.xml").unwrap();
        let slide_uri = PartUri::new("/ppt/slides/slide1.xml").unwrap();
        let mut rels = Relationships::new();
        rels.add(rel_types::SLIDE, "slides/slide1.xml");
        pkg.add_part(Part::new(pres_uri.clone(), MAIN_DOCUMENT, b"<p/>".to_vec()).with_relationships(rels));
        pkg.add_part(Part::new(slide_uri.clone(), SLIDE, b"<sld/>".to_vec()));
        pkg.relationships_mut().add(rel_types::OFFICE_DOCUMENT, "ppt/presentation.xml");

        let reopened = Package::from_bytes(&pkg.to_bytes().unwrap()).unwrap();

        let main = reopened.main_part().expect("main part");
        assert_eq!(main.uri(), &pres_uri);
        assert_eq!(main.content_type(), MAIN_DOCUMENT);
        let slides = reopened.related_parts(main, rel_types::SLIDE);
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].data(), b"<sld/>");
        assert_eq!(reopened.part(&slide_uri).unwrap().content_type(), SLIDE);
    }

    #[test]
    fn test_add_part_uses_extension_default_when_it_fits() {
        let mut pkg = Package::new();
        pkg.content_types_mut().add_default("png", "image/png");
        let uri = PartUri::new("/word/media/image1.png").unwrap();
        pkg.add_part(Part::new(uri.clone(), "image/png", vec![0x89]));

        let mut buf = Vec::new();
        pkg.content_types().write_to(&mut buf).unwrap();
        let xml = String::from_utf8(buf).unwrap();
        assert!(!xml.contains("/word/media/image1.png"));

        pkg.remove_part(&uri);
        assert!(pkg.part(&uri).is_none());
    }
}
