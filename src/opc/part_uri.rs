//! Part names inside an OPC package

use crate::error::{Error, Result};
use std::fmt;

/// Absolute name of a part within a package, e.g. `/ppt/slides/slide1.xml`.
///
/// Always starts with `/` and never ends with one.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartUri {
    path: String,
}

impl PartUri {
    /// Normalize and validate a part name
    pub fn new(path: &str) -> Result<Self> {
        let path = path.trim();
        if path.is_empty() {
            return Err(Error::InvalidPartUri("empty path".into()));
        }

        let mut normalized = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        while normalized.len() > 1 && normalized.ends_with('/') {
            normalized.pop();
        }

        if normalized.contains("//") {
            return Err(Error::InvalidPartUri(format!("'{path}' contains double slashes")));
        }
        Ok(Self { path: normalized })
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Name inside the ZIP archive (no leading slash)
    pub fn zip_name(&self) -> &str {
        &self.path[1..]
    }

    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("")
    }

    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        let dot = name.rfind('.')?;
        Some(&name[dot + 1..]).filter(|ext| !ext.is_empty())
    }

    /// Directory holding the part, `""` for parts at the root
    pub fn directory(&self) -> &str {
        match self.path.rfind('/') {
            Some(pos) => &self.path[..pos],
            None => "",
        }
    }

    /// `.rels` part describing this part's relationships.
    ///
    /// `/word/document.xml` maps to `/word/_rels/document.xml.rels`.
    pub fn relationships_uri(&self) -> PartUri {
        PartUri {
            path: format!("{}/_rels/{}.rels", self.directory(), self.file_name()),
        }
    }

    /// Resolve a relationship target relative to this part
    pub fn resolve(&self, target: &str) -> Result<PartUri> {
        if target.starts_with('/') {
            return PartUri::new(target);
        }

        let mut segments: Vec<&str> = self.directory().split('/').filter(|s| !s.is_empty()).collect();
        for segment in target.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s => segments.push(s),
            }
        }
        PartUri::new(&format!("/{}", segments.join("/")))
    }

    pub fn is_relationships(&self) -> bool {
        self.path.contains("/_rels/") && self.path.ends_with(".rels")
    }
}

impl fmt::Display for PartUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl std::str::FromStr for PartUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PartUri::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_leading_and_trailing_slash() {
        assert_eq!(PartUri::new("ppt/slides/").unwrap().as_str(), "/ppt/slides");
        assert_eq!(PartUri::new("/word/document.xml").unwrap().zip_name(), "word/document.xml");
    }

    #[test]
    fn test_rejects_bad_names() {
        assert!(PartUri::new("  ").is_err());
        assert!(PartUri::new("/word//document.xml").is_err());
    }

    #[test]
    fn test_file_name_and_extension() {
        let uri = PartUri::new("/ppt/media/image3.jpeg").unwrap();
        assert_eq!(uri.file_name(), "image3.jpeg");
        assert_eq!(uri.extension(), Some("jpeg"));
        assert_eq!(PartUri::new("/LICENSE").unwrap().extension(), None);
    }

    #[test]
    fn test_relationships_uri() {
        let slide = PartUri::new("/ppt/slides/slide2.xml").unwrap();
        assert_eq!(slide.relationships_uri().as_str(), "/ppt/slides/_rels/slide2.xml.rels");
        assert!(slide.relationships_uri().is_relationships());
        assert!(!slide.is_relationships());

        let root = PartUri::new("/presentation.xml").unwrap();
        assert_eq!(root.relationships_uri().as_str(), "/_rels/presentation.xml.rels");
    }

    #[test]
    fn test_resolve() {
        let slide = PartUri::new("/ppt/slides/slide1.xml").unwrap();
        assert_eq!(slide.resolve("../media/image1.png").unwrap().as_str(), "/ppt/media/image1.png");
        assert_eq!(slide.resolve("slide2.xml").unwrap().as_str(), "/ppt/slides/slide2.xml");
        assert_eq!(slide.resolve("/docProps/app.xml").unwrap().as_str(), "/docProps/app.xml");
    }
}
