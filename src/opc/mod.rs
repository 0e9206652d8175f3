//! Open Packaging Convention (OPC) container shared by DOCX and PPTX

mod content_types;
mod package;
mod part;
mod part_uri;
mod relationships;

pub use content_types::{
    ContentTypes, MAIN_DOCUMENT, PRESENTATION, RELATIONSHIPS, SLIDE, SLIDE_LAYOUT, SLIDE_MASTER,
    STYLES, TABLE_STYLES, THEME, XML,
};
pub use package::Package;
pub use part::Part;
pub use part_uri::PartUri;
pub use relationships::{rel_types, Relationship, Relationships, TargetMode};
