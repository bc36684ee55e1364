//! Document adapters - Implementations of the ReportExporter port.
//!
//! - `PdfReportExporter` - single-page A4 PDF, the downloadable report
//! - `TextReportExporter` - plain text, for terminals and logs

mod pdf_exporter;
mod text_exporter;

use std::sync::Arc;

use crate::ports::{ExportFormat, ReportExporter};

pub use pdf_exporter::PdfReportExporter;
pub use text_exporter::TextReportExporter;

/// Returns the exporter that produces `format`.
pub fn exporter_for(format: ExportFormat) -> Arc<dyn ReportExporter> {
    match format {
        ExportFormat::Pdf => Arc::new(PdfReportExporter::new()),
        ExportFormat::Text => Arc::new(TextReportExporter),
    }
}
