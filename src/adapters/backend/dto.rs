//! Wire formats of the backend API.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::AnalysisResult;
use crate::domain::diagnostic::AnswerStore;

#[derive(Debug, Deserialize)]
pub(super) struct LeadResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub(super) struct SubmitRequest<'a> {
    pub lead_id: &'a str,
    pub answers: &'a AnswerStore,
}

#[derive(Debug, Deserialize)]
pub(super) struct SubmitResponse {
    pub result_id: String,
}

/// `GET /results/{id}` body. Extra fields such as `result_id` are ignored.
#[derive(Debug, Deserialize)]
pub(super) struct AnalysisEnvelope {
    #[serde(default)]
    pub analysis: AnalysisResult,
}

#[derive(Debug, Serialize)]
pub(super) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginSuccess {
    pub access_token: String,
}

/// FastAPI-style error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Extracts a human-readable detail string, if the body carries one.
    pub fn detail_from(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        match parsed.detail {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::SectionKey;

    #[test]
    fn envelope_unwraps_analysis() {
        let body = r#"{
            "result_id": "r1",
            "analysis": {
                "mindset_shift": {"title": "T", "description": "D"},
                "next_move": {"title": "N", "description": "M"}
            }
        }"#;
        let envelope: AnalysisEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.analysis.get(SectionKey::MindsetShift).is_some());
        assert!(envelope.analysis.get(SectionKey::OperationalFocus).is_none());
    }

    #[test]
    fn envelope_without_analysis_is_empty() {
        let envelope: AnalysisEnvelope = serde_json::from_str("{}").unwrap();
        assert!(!envelope.analysis.is_complete());
    }

    #[test]
    fn error_detail_extraction() {
        assert_eq!(
            ErrorBody::detail_from(r#"{"detail":"Incorrect email or password"}"#).as_deref(),
            Some("Incorrect email or password")
        );
        assert_eq!(ErrorBody::detail_from("<html>"), None);
    }

    #[test]
    fn submit_request_serializes_answers_as_map() {
        let mut answers = AnswerStore::new();
        answers.set("q1", "Hiring");
        let json = serde_json::to_value(SubmitRequest {
            lead_id: "l1",
            answers: &answers,
        })
        .unwrap();
        assert_eq!(json["answers"]["q1"], "Hiring");
        assert_eq!(json["lead_id"], "l1");
    }
}
