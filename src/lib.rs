//! # mstk
//!
//! Helpers for building report documents (DOCX) and slide decks (PPTX) from
//! plain data: titled tables, figures, text frames, logos and proportional
//! layouts.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mstk::{deck, report, Document, LabeledTable, Presentation};
//!
//! let table = LabeledTable::from_rows(&["2022", "2023"], [
//!     ("Dogs", vec![12.0, 13.5]),
//!     ("Cats", vec![11.0, 12.2]),
//! ])?;
//!
//! // Word report
//! let mut doc = Document::new();
//! report::add_table_from_data(&mut doc, "Pet population (m)", &table, Some("Source: survey"))?;
//! doc.save("report.docx")?;
//!
//! // Slide deck
//! let mut prs = Presentation::new();
//! deck::set_slide_size(&mut prs, 26.0, 15.0);
//! let slide = deck::add_new_slide(&mut prs, "Pet population", "logo.png")?;
//! deck::add_table_from_data(slide, &table, 0.1, 1.6, 12.0, 4.0, &Default::default())?;
//! prs.save("deck.pptx")?;
//! ```

pub mod color;
pub mod data;
pub mod deck;
pub mod document;
pub mod error;
pub mod layout;
pub mod opc;
pub mod picture;
pub mod presentation;
pub mod report;
pub mod text;
pub mod units;
pub mod xml;

pub use color::{Palette, RgbColor};
pub use data::{CellValue, LabeledTable};
pub use document::{Document, Paragraph, Run, Table};
pub use error::{Error, Result};
pub use layout::{Rect, Segment};
pub use opc::{Package, Part, PartUri};
pub use picture::Picture;
pub use presentation::{Presentation, Slide};
pub use units::Length;
