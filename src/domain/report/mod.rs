//! Report - deterministic layout of an analysis result as a one-page document.
//!
//! `ReportRenderer` is a pure function from [`AnalysisResult`] to
//! [`ReportDocument`]. Turning the document into bytes is the job of a
//! `ReportExporter` adapter.
//!
//! [`AnalysisResult`]: crate::domain::analysis::AnalysisResult

mod document;
pub mod layout;
mod renderer;
mod wrap;

pub use document::{PlacedText, RenderedSection, ReportDocument};
pub use layout::{ColorTag, PageGeometry};
pub use renderer::ReportRenderer;
pub use wrap::wrap_words;
