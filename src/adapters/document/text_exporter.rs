//! Plain-text report exporter.

use crate::domain::report::ReportDocument;
use crate::ports::{ExportError, ExportFormat, ReportExporter};

#[derive(Debug, Clone, Copy, Default)]
pub struct TextReportExporter;

impl ReportExporter for TextReportExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Text
    }

    fn encode(&self, document: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        Ok(document.to_plain_text().into_bytes())
    }
}
