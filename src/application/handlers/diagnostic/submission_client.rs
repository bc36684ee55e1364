//! SubmissionClient - lead registration and answer submission.
//!
//! Both operations are fail-open: a backend failure is logged and reported
//! in the outcome, never returned as an error, so the user is never blocked
//! by an outage. This is a known weak point. A failed submission leaves no
//! result reference, which `ResultsLoader` detects and turns into a redirect.

use std::sync::Arc;

use crate::domain::diagnostic::AnswerStore;
use crate::domain::foundation::{LeadRef, ResultRef};
use crate::domain::lead::LeadRegistration;
use crate::ports::{ApiError, DiagnosticApi, TokenKey, TokenStore, TokenStoreError};

/// Result of registering a lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadOutcome {
    /// The lead reference is stored.
    Registered(LeadRef),
    /// Registration failed; no lead reference is stored.
    Degraded(ApiError),
}

/// Result of submitting a completed answer set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The result reference is stored.
    Stored(ResultRef),
    /// Submission failed; no result reference is stored.
    Failed { reason: String },
}

impl SubmissionOutcome {
    pub fn result_ref(&self) -> Option<&ResultRef> {
        match self {
            SubmissionOutcome::Stored(result) => Some(result),
            SubmissionOutcome::Failed { .. } => None,
        }
    }
}

/// Boundary between the flow and the diagnostic backend.
#[derive(Clone)]
pub struct SubmissionClient {
    api: Arc<dyn DiagnosticApi>,
    tokens: Arc<dyn TokenStore>,
}

impl SubmissionClient {
    pub fn new(api: Arc<dyn DiagnosticApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }

    /// Registers a lead, starting a new session.
    ///
    /// Any previous result reference is cleared first. On backend failure the
    /// lead reference is cleared as well and `Degraded` is returned.
    ///
    /// # Errors
    ///
    /// Only token storage failures are returned.
    pub async fn register_lead(
        &self,
        lead: &LeadRegistration,
    ) -> Result<LeadOutcome, TokenStoreError> {
        self.tokens.clear(TokenKey::ResultRef).await?;

        match self.api.register_lead(lead).await {
            Ok(lead_ref) => {
                self.tokens.set(TokenKey::LeadRef, lead_ref.as_str()).await?;
                tracing::info!(
                    lead_ref = %lead_ref,
                    company_size = %lead.company_size,
                    "lead registered"
                );
                Ok(LeadOutcome::Registered(lead_ref))
            }
            Err(error) => {
                self.tokens.clear(TokenKey::LeadRef).await?;
                tracing::warn!(%error, "lead registration failed; continuing without a lead reference");
                Ok(LeadOutcome::Degraded(error))
            }
        }
    }

    /// Submits the completed answers and stores the result reference.
    ///
    /// Never fails: every error is logged and folded into `Failed`.
    pub async fn submit_answers(&self, lead: &LeadRef, answers: &AnswerStore) -> SubmissionOutcome {
        let result_ref = match self.api.submit_answers(lead, answers).await {
            Ok(result_ref) => result_ref,
            Err(error) => {
                tracing::warn!(lead_ref = %lead, %error, "answer submission failed; completing anyway");
                return SubmissionOutcome::Failed {
                    reason: error.to_string(),
                };
            }
        };

        if let Err(error) = self.tokens.set(TokenKey::ResultRef, result_ref.as_str()).await {
            tracing::warn!(result_ref = %result_ref, %error, "could not store result reference");
            return SubmissionOutcome::Failed {
                reason: error.to_string(),
            };
        }

        tracing::info!(
            lead_ref = %lead,
            result_ref = %result_ref,
            answers = answers.len(),
            "answers submitted"
        );
        SubmissionOutcome::Stored(result_ref)
    }

    /// The stored lead reference, if any.
    pub async fn stored_lead_ref(&self) -> Result<Option<LeadRef>, TokenStoreError> {
        let stored = self.tokens.get(TokenKey::LeadRef).await?;
        Ok(stored.and_then(|value| LeadRef::new(value).ok()))
    }

    /// The stored result reference, if any.
    pub async fn stored_result_ref(&self) -> Result<Option<ResultRef>, TokenStoreError> {
        let stored = self.tokens.get(TokenKey::ResultRef).await?;
        Ok(stored.and_then(|value| ResultRef::new(value).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryTokenStore, MockDiagnosticApi};
    use crate::domain::lead::CompanySizeBand;

    fn lead() -> LeadRegistration {
        LeadRegistration::new("Ada", "ada@example.com", CompanySizeBand::From36To60)
    }

    fn client(api: MockDiagnosticApi, tokens: InMemoryTokenStore) -> SubmissionClient {
        SubmissionClient::new(Arc::new(api), Arc::new(tokens))
    }

    #[tokio::test]
    async fn registration_stores_lead_and_clears_old_result() {
        let tokens = InMemoryTokenStore::with_tokens([(TokenKey::ResultRef, "old".to_string())]);
        let client = client(MockDiagnosticApi::new(), tokens.clone());

        let outcome = client.register_lead(&lead()).await.unwrap();

        assert!(matches!(outcome, LeadOutcome::Registered(_)));
        assert_eq!(tokens.get(TokenKey::LeadRef).await.unwrap().as_deref(), Some("lead-1"));
        assert_eq!(tokens.get(TokenKey::ResultRef).await.unwrap(), None);
    }

    #[tokio::test]
    async fn failed_registration_degrades_without_lead() {
        let tokens = InMemoryTokenStore::with_tokens([(TokenKey::LeadRef, "stale".to_string())]);
        let api = MockDiagnosticApi::new().with_lead_response(Err(ApiError::network("offline")));
        let client = client(api, tokens.clone());

        let outcome = client.register_lead(&lead()).await.unwrap();

        assert!(matches!(outcome, LeadOutcome::Degraded(_)));
        assert_eq!(client.stored_lead_ref().await.unwrap(), None);
    }

    #[tokio::test]
    async fn successful_submission_stores_result_ref() {
        let tokens = InMemoryTokenStore::new();
        let api = MockDiagnosticApi::new()
            .with_submit_response(Ok(ResultRef::new("res-7").unwrap()));
        let client = client(api, tokens.clone());
        let lead_ref = LeadRef::new("lead-1").unwrap();

        let outcome = client.submit_answers(&lead_ref, &AnswerStore::new()).await;

        assert_eq!(outcome.result_ref().map(ResultRef::as_str), Some("res-7"));
        assert_eq!(tokens.get(TokenKey::ResultRef).await.unwrap().as_deref(), Some("res-7"));
    }

    #[tokio::test]
    async fn failed_submission_is_folded_into_outcome() {
        let tokens = InMemoryTokenStore::new();
        let api = MockDiagnosticApi::new()
            .with_submit_response(Err(ApiError::from_status(500, "boom")));
        let client = client(api, tokens.clone());

        let outcome = client
            .submit_answers(&LeadRef::new("l").unwrap(), &AnswerStore::new())
            .await;

        assert!(matches!(outcome, SubmissionOutcome::Failed { .. }));
        assert_eq!(client.stored_result_ref().await.unwrap(), None);
    }
}
