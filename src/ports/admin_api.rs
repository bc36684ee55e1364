//! Admin API Port - operator login and read-only dashboards.
//!
//! All calls except `login` carry the bearer token obtained from it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ApiError;

/// Aggregate figures shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_leads: u64,
    pub total_responses: u64,
    /// Percentage of leads that submitted answers.
    pub completion_rate: f64,
}

/// One stored questionnaire response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminResponseItem {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a login attempt that reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginResponse {
    Accepted { token: String },
    /// Credentials refused; `detail` is the backend's message.
    Rejected { detail: String },
}

/// Port for the admin backend.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, ApiError>;

    async fn stats(&self, token: &str) -> Result<AdminStats, ApiError>;

    async fn responses(&self, token: &str) -> Result<Vec<AdminResponseItem>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_item_parses_backend_payload() {
        let json = r#"{
            "id": "r-1",
            "name": "Ada",
            "email": "ada@example.com",
            "answers": {"q1": "Hiring"},
            "created_at": "2024-05-01T12:00:00Z"
        }"#;
        let item: AdminResponseItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.answers.get("q1").map(String::as_str), Some("Hiring"));
        assert_eq!(item.created_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn response_item_tolerates_missing_answers() {
        let json = r#"{"id":"r","name":"n","email":"e","created_at":"2024-05-01T12:00:00Z"}"#;
        let item: AdminResponseItem = serde_json::from_str(json).unwrap();
        assert!(item.answers.is_empty());
    }
}
