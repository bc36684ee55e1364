//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TokenStore` - durable lead/result/admin tokens
//! - `DiagnosticApi` - lead registration, answer submission, analysis, email
//! - `AdminApi` - operator login and dashboards
//! - `ReportExporter` - report document to downloadable bytes

mod admin_api;
mod diagnostic_api;
mod report_exporter;
mod token_store;

pub use admin_api::{AdminApi, AdminResponseItem, AdminStats, LoginResponse};
pub use diagnostic_api::{ApiError, ApiErrorCode, DiagnosticApi};
pub use report_exporter::{
    ExportError, ExportFormat, ReportArtifact, ReportExporter, REPORT_BASE_FILENAME,
};
pub use token_store::{TokenKey, TokenStore, TokenStoreError};
