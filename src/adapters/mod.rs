//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `backend` - reqwest clients for the diagnostic and admin APIs, plus mocks
//! - `storage` - Token stores (file, in-memory)
//! - `document` - Report exporters (PDF, plain text)

pub mod backend;
pub mod document;
pub mod storage;

pub use backend::{
    BackendConfig, HttpAdminApi, HttpDiagnosticApi, MockAdminApi, MockCall, MockDiagnosticApi,
};
pub use document::{exporter_for, PdfReportExporter, TextReportExporter};
pub use storage::{FileTokenStore, InMemoryTokenStore};
