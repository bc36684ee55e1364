//! Report Exporter Port - turns a laid-out report into a deliverable file.
//!
//! The domain produces a [`ReportDocument`]; adapters (like `PdfReportExporter`)
//! encode it. Both delivery channels, download and email, share the same
//! artifact so the bytes a user saves equal the bytes that are mailed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::report::ReportDocument;

/// Base name of every exported report.
pub const REPORT_BASE_FILENAME: &str = "founder-clarity-report";

/// Port for encoding a report document.
///
/// # Contract
///
/// Implementations must:
/// - Produce identical bytes for identical documents
/// - Place every section of the document on a single page
/// - Never fail for a document produced by `ReportRenderer`
pub trait ReportExporter: Send + Sync {
    /// The format this exporter produces.
    fn format(&self) -> ExportFormat;

    /// Encodes the document.
    fn encode(&self, document: &ReportDocument) -> Result<Vec<u8>, ExportError>;

    /// Encodes the document and wraps it with download metadata.
    fn export(&self, document: &ReportDocument) -> Result<ReportArtifact, ExportError> {
        let content = self.encode(document)?;
        Ok(ReportArtifact::new(content, self.format()))
    }
}

/// Export formats supported for the clarity report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// PDF document.
    Pdf,
    /// Plain UTF-8 text.
    Text,
}

impl ExportFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Text => "text/plain; charset=utf-8",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Text => "txt",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Exported report with content and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    /// The exported content as bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Suggested filename for download and upload.
    pub filename: String,
}

impl ReportArtifact {
    pub fn new(content: Vec<u8>, format: ExportFormat) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", REPORT_BASE_FILENAME, format.extension()),
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Errors that can occur during report export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Unsupported export format requested.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Encoding failed.
    #[error("Report encoding failed: {0}")]
    EncodingFailed(String),
}

impl From<std::fmt::Error> for ExportError {
    fn from(err: std::fmt::Error) -> Self {
        ExportError::EncodingFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_artifact_uses_fixed_filename() {
        let artifact = ReportArtifact::new(b"%PDF".to_vec(), ExportFormat::Pdf);
        assert_eq!(artifact.filename, "founder-clarity-report.pdf");
        assert_eq!(artifact.content_type, "application/pdf");
        assert_eq!(artifact.len(), 4);
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!(matches!(
            "docx".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn formatter_failure_is_an_encoding_error() {
        let err = ExportError::from(std::fmt::Error);
        assert!(matches!(err, ExportError::EncodingFailed(_)));
        assert!(err.to_string().starts_with("Report encoding failed"));
    }
}
