//! avalia-export
//!
//! The report generator: groups the merged evaluation view into a report
//! structure, renders it through a Tera template (Markdown), and converts
//! the rendered Markdown subset to DOCX. Page layout beyond that is the PDF
//! collaborator's problem, not this crate's.

pub mod docx;
pub mod error;
pub mod render;
pub mod report;
pub mod styles;

pub use error::ExportError;
