//! A single part of an OPC package

use crate::opc::{PartUri, Relationships};

/// Named blob with a content type and, optionally, its own relationships
#[derive(Clone, Debug)]
pub struct Part {
    uri: PartUri,
    content_type: String,
    data: Vec<u8>,
    relationships: Option<Relationships>,
}

impl Part {
    pub fn new(uri: PartUri, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            uri,
            content_type: content_type.into(),
            data,
            relationships: None,
        }
    }

    /// Attach relationships, skipping empty sets so no `.rels` file is written for them
    pub fn with_relationships(mut self, rels: Relationships) -> Self {
        if !rels.is_empty() {
            self.relationships = Some(rels);
        }
        self
    }

    pub fn uri(&self) -> &PartUri {
        &self.uri
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.data)
    }

    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
    }

    pub fn relationships(&self) -> Option<&Relationships> {
        self.relationships.as_ref()
    }

    pub fn set_relationships(&mut self, rels: Relationships) {
        self.relationships = Some(rels);
    }

    /// Take the relationships out, leaving none behind
    pub fn take_relationships(&mut self) -> Relationships {
        self.relationships.take().unwrap_or_default()
    }
}
