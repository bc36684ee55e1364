//! Diagnostic API Port - the backend that stores leads and answers, runs the
//! analysis and emails reports.
//!
//! # Endpoints
//!
//! | Operation      | Method/Path                | Body                             |
//! |----------------|----------------------------|----------------------------------|
//! | register lead  | `POST /leads`              | `{name, email, company_size}`    |
//! | submit answers | `POST /responses`          | `{lead_id, answers}`             |
//! | fetch analysis | `GET /results/{id}`        | -                                |
//! | email report   | `POST /results/{id}/email` | multipart, file field `file`     |

use async_trait::async_trait;
use std::fmt;

use crate::domain::analysis::AnalysisResult;
use crate::domain::diagnostic::AnswerStore;
use crate::domain::foundation::{LeadRef, ResultRef};
use crate::domain::lead::LeadRegistration;

use super::ReportArtifact;

/// Port for the diagnostic backend.
///
/// Implementations never retry; a failed call is final for that attempt.
#[async_trait]
pub trait DiagnosticApi: Send + Sync {
    /// Registers a lead and returns its reference.
    async fn register_lead(&self, lead: &LeadRegistration) -> Result<LeadRef, ApiError>;

    /// Stores a completed answer set and returns the analysis reference.
    async fn submit_answers(
        &self,
        lead: &LeadRef,
        answers: &AnswerStore,
    ) -> Result<ResultRef, ApiError>;

    /// Fetches the analysis for a result reference.
    async fn fetch_analysis(&self, result: &ResultRef) -> Result<AnalysisResult, ApiError>;

    /// Uploads the rendered report so the backend can email it.
    async fn email_report(&self, result: &ResultRef, artifact: &ReportArtifact)
        -> Result<(), ApiError>;
}

/// Error categories for backend calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    /// Connection refused, DNS failure, reset.
    Network,
    /// The transport gave up waiting.
    Timeout,
    /// HTTP 401.
    Unauthorized,
    /// HTTP 404.
    NotFound,
    /// Other 4xx.
    Rejected,
    /// 5xx.
    Server,
    /// Body did not match the expected contract.
    InvalidResponse,
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApiErrorCode::Network => "NETWORK",
            ApiErrorCode::Timeout => "TIMEOUT",
            ApiErrorCode::Unauthorized => "UNAUTHORIZED",
            ApiErrorCode::NotFound => "NOT_FOUND",
            ApiErrorCode::Rejected => "REJECTED",
            ApiErrorCode::Server => "SERVER",
            ApiErrorCode::InvalidResponse => "INVALID_RESPONSE",
        };
        write!(f, "{}", s)
    }
}

/// Error returned by backend calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Timeout, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::InvalidResponse, message)
    }

    /// Maps an HTTP error status to an error code.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let code = match status {
            401 => ApiErrorCode::Unauthorized,
            404 => ApiErrorCode::NotFound,
            400..=499 => ApiErrorCode::Rejected,
            _ => ApiErrorCode::Server,
        };
        Self::new(code, message).with_status(status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == ApiErrorCode::Unauthorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::from_status(401, "x").code, ApiErrorCode::Unauthorized);
        assert_eq!(ApiError::from_status(404, "x").code, ApiErrorCode::NotFound);
        assert_eq!(ApiError::from_status(422, "x").code, ApiErrorCode::Rejected);
        assert_eq!(ApiError::from_status(503, "x").code, ApiErrorCode::Server);
        assert_eq!(ApiError::from_status(503, "x").status, Some(503));
    }

    #[test]
    fn display_includes_code_and_message() {
        let err = ApiError::network("connection refused");
        assert_eq!(err.to_string(), "NETWORK: connection refused");
    }
}
