//! In-process backends for testing and offline demos.
//!
//! # Features
//!
//! - Pre-configured responses per endpoint, consumed in order
//! - Sensible defaults once a queue is empty
//! - Simulated latency for in-flight testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let api = MockDiagnosticApi::new()
//!     .with_submit_response(Err(ApiError::network("offline")))
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::analysis::{AnalysisResult, Section};
use crate::domain::diagnostic::AnswerStore;
use crate::domain::foundation::{LeadRef, ResultRef};
use crate::domain::lead::LeadRegistration;
use crate::ports::{
    AdminApi, AdminResponseItem, AdminStats, ApiError, ApiErrorCode, DiagnosticApi, LoginResponse,
    ReportArtifact,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A recorded call against [`MockDiagnosticApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    RegisterLead(LeadRegistration),
    SubmitAnswers { lead: LeadRef, answers: AnswerStore },
    FetchAnalysis(ResultRef),
    EmailReport { result: ResultRef, artifact: ReportArtifact },
}

#[derive(Debug, Default)]
struct Script {
    leads: VecDeque<Result<LeadRef, ApiError>>,
    submissions: VecDeque<Result<ResultRef, ApiError>>,
    analyses: VecDeque<Result<AnalysisResult, ApiError>>,
    emails: VecDeque<Result<(), ApiError>>,
}

/// Mock diagnostic backend.
#[derive(Debug, Clone, Default)]
pub struct MockDiagnosticApi {
    script: Arc<Mutex<Script>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockDiagnosticApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lead_response(self, response: Result<LeadRef, ApiError>) -> Self {
        lock(&self.script).leads.push_back(response);
        self
    }

    pub fn with_submit_response(self, response: Result<ResultRef, ApiError>) -> Self {
        lock(&self.script).submissions.push_back(response);
        self
    }

    pub fn with_analysis_response(self, response: Result<AnalysisResult, ApiError>) -> Self {
        lock(&self.script).analyses.push_back(response);
        self
    }

    pub fn with_email_response(self, response: Result<(), ApiError>) -> Self {
        lock(&self.script).emails.push_back(response);
        self
    }

    /// Sets the simulated latency applied to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Answer sets received by `submit_answers`.
    pub fn submissions(&self) -> Vec<(LeadRef, AnswerStore)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::SubmitAnswers { lead, answers } => Some((lead, answers)),
                _ => None,
            })
            .collect()
    }

    /// Artifacts received by `email_report`.
    pub fn emailed(&self) -> Vec<(ResultRef, ReportArtifact)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::EmailReport { result, artifact } => Some((result, artifact)),
                _ => None,
            })
            .collect()
    }

    /// The analysis returned when no response is scripted.
    pub fn default_analysis() -> AnalysisResult {
        AnalysisResult::new(
            Section::new(
                "From 'Doing It All' to 'Delegating with Trust'",
                "You often feel like the bottleneck. The key shift is building systems that allow your team to execute without your constant oversight.",
            ),
            Section::new(
                "Streamline Customer Onboarding",
                "Your growth is leaking at the handoff between sales and delivery. Map the first thirty days of a new customer and remove every manual step you personally touch.",
            ),
            Section::new(
                "Run a Friction Workshop",
                "Block two hours this week with your leadership team to list the three recurring issues that reach your desk, and assign an owner to each.",
            ),
        )
    }

    async fn record(&self, call: MockCall) -> usize {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        let mut calls = lock(&self.calls);
        calls.push(call);
        calls.len()
    }
}

#[async_trait]
impl DiagnosticApi for MockDiagnosticApi {
    async fn register_lead(&self, lead: &LeadRegistration) -> Result<LeadRef, ApiError> {
        let n = self.record(MockCall::RegisterLead(lead.clone())).await;
        let scripted = lock(&self.script).leads.pop_front();
        scripted.unwrap_or_else(|| {
            LeadRef::new(format!("lead-{}", n)).map_err(|e| ApiError::invalid_response(e.to_string()))
        })
    }

    async fn submit_answers(
        &self,
        lead: &LeadRef,
        answers: &AnswerStore,
    ) -> Result<ResultRef, ApiError> {
        let n = self
            .record(MockCall::SubmitAnswers {
                lead: lead.clone(),
                answers: answers.clone(),
            })
            .await;
        let scripted = lock(&self.script).submissions.pop_front();
        scripted.unwrap_or_else(|| {
            ResultRef::new(format!("result-{}", n))
                .map_err(|e| ApiError::invalid_response(e.to_string()))
        })
    }

    async fn fetch_analysis(&self, result: &ResultRef) -> Result<AnalysisResult, ApiError> {
        self.record(MockCall::FetchAnalysis(result.clone())).await;
        let scripted = lock(&self.script).analyses.pop_front();
        scripted.unwrap_or_else(|| Ok(Self::default_analysis()))
    }

    async fn email_report(
        &self,
        result: &ResultRef,
        artifact: &ReportArtifact,
    ) -> Result<(), ApiError> {
        self.record(MockCall::EmailReport {
            result: result.clone(),
            artifact: artifact.clone(),
        })
        .await;
        let scripted = lock(&self.script).emails.pop_front();
        scripted.unwrap_or(Ok(()))
    }
}

#[derive(Debug)]
struct AdminState {
    issued: Vec<String>,
    responses: Vec<AdminResponseItem>,
}

/// Mock admin backend with a single operator account.
#[derive(Debug, Clone)]
pub struct MockAdminApi {
    email: String,
    password: String,
    state: Arc<Mutex<AdminState>>,
}

impl MockAdminApi {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            state: Arc::new(Mutex::new(AdminState {
                issued: Vec::new(),
                responses: Vec::new(),
            })),
        }
    }

    /// Adds a stored response to the listing.
    pub fn with_response(self, name: &str, email: &str, answers: &[(&str, &str)]) -> Self {
        {
            let mut state = lock(&self.state);
            let id = format!("resp-{}", state.responses.len() + 1);
            state.responses.push(AdminResponseItem {
                id,
                name: name.to_string(),
                email: email.to_string(),
                answers: answers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<BTreeMap<_, _>>(),
                created_at: Utc::now(),
            });
        }
        self
    }

    /// Invalidates every issued token, as a backend restart or expiry would.
    pub fn expire_tokens(&self) {
        lock(&self.state).issued.clear();
    }

    fn authorize(&self, token: &str) -> Result<(), ApiError> {
        if lock(&self.state).issued.iter().any(|t| t == token) {
            Ok(())
        } else {
            Err(ApiError::new(ApiErrorCode::Unauthorized, "Could not validate credentials")
                .with_status(401))
        }
    }
}

#[async_trait]
impl AdminApi for MockAdminApi {
    async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, ApiError> {
        if email != self.email || password.expose_secret() != &self.password {
            return Ok(LoginResponse::Rejected {
                detail: "Incorrect email or password".to_string(),
            });
        }
        let mut state = lock(&self.state);
        let token = format!("mock-token-{}", state.issued.len() + 1);
        state.issued.push(token.clone());
        Ok(LoginResponse::Accepted { token })
    }

    async fn stats(&self, token: &str) -> Result<AdminStats, ApiError> {
        self.authorize(token)?;
        let total_responses = lock(&self.state).responses.len() as u64;
        let total_leads = total_responses.max(1);
        Ok(AdminStats {
            total_leads,
            total_responses,
            completion_rate: (total_responses as f64 / total_leads as f64 * 10000.0).round()
                / 100.0,
        })
    }

    async fn responses(&self, token: &str) -> Result<Vec<AdminResponseItem>, ApiError> {
        self.authorize(token)?;
        Ok(lock(&self.state).responses.clone())
    }
}
