//! XML namespaces used by the generated parts

/// WordprocessingML main namespace
pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Relationships namespace
pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// WordprocessingML drawing namespace
pub const WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
/// DrawingML main namespace
pub const A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// DrawingML picture namespace
pub const PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
/// PresentationML main namespace
pub const P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
/// DrawingML table graphic data URI
pub const TABLE_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/table";

/// Namespace declarations for `word/document.xml`
pub fn document_namespaces() -> Vec<(&'static str, &'static str)> {
    vec![
        ("xmlns:w", W),
        ("xmlns:r", R),
        ("xmlns:wp", WP),
        ("xmlns:a", A),
        ("xmlns:pic", PIC),
    ]
}

/// Namespace declarations for slides, layouts and masters
pub fn presentation_namespaces() -> Vec<(&'static str, &'static str)> {
    vec![("xmlns:a", A), ("xmlns:r", R), ("xmlns:p", P)]
}
