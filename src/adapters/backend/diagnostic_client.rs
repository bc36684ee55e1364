//! HTTP implementation of the DiagnosticApi port.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use super::dto::{AnalysisEnvelope, LeadResponse, SubmitRequest, SubmitResponse};
use super::{build_client, check_status, decode, map_send_error, BackendConfig};
use crate::domain::analysis::AnalysisResult;
use crate::domain::diagnostic::AnswerStore;
use crate::domain::foundation::{LeadRef, ResultRef};
use crate::domain::lead::LeadRegistration;
use crate::ports::{ApiError, DiagnosticApi, ReportArtifact};

/// Diagnostic backend client.
#[derive(Debug, Clone)]
pub struct HttpDiagnosticApi {
    config: BackendConfig,
    client: Client,
}

impl HttpDiagnosticApi {
    pub fn new(config: BackendConfig) -> Result<Self, ApiError> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

#[async_trait]
impl DiagnosticApi for HttpDiagnosticApi {
    async fn register_lead(&self, lead: &LeadRegistration) -> Result<LeadRef, ApiError> {
        let response = self
            .client
            .post(self.config.url("/leads"))
            .json(lead)
            .send()
            .await
            .map_err(map_send_error)?;

        let body: LeadResponse = decode(check_status(response).await?).await?;
        LeadRef::new(body.id).map_err(|e| ApiError::invalid_response(e.to_string()))
    }

    async fn submit_answers(
        &self,
        lead: &LeadRef,
        answers: &AnswerStore,
    ) -> Result<ResultRef, ApiError> {
        let request = SubmitRequest {
            lead_id: lead.as_str(),
            answers,
        };

        let response = self
            .client
            .post(self.config.url("/responses"))
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let body: SubmitResponse = decode(check_status(response).await?).await?;
        ResultRef::new(body.result_id).map_err(|e| ApiError::invalid_response(e.to_string()))
    }

    async fn fetch_analysis(&self, result: &ResultRef) -> Result<AnalysisResult, ApiError> {
        let url = self.config.url_with_segments(&["results", result.as_str()])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_send_error)?;

        let envelope: AnalysisEnvelope = decode(check_status(response).await?).await?;
        Ok(envelope.analysis)
    }

    async fn email_report(
        &self,
        result: &ResultRef,
        artifact: &ReportArtifact,
    ) -> Result<(), ApiError> {
        let part = Part::bytes(artifact.content.clone())
            .file_name(artifact.filename.clone())
            .mime_str(&artifact.content_type)
            .map_err(|e| ApiError::invalid_response(format!("Invalid content type: {}", e)))?;
        let form = Form::new().part("file", part);
        let url = self
            .config
            .url_with_segments(&["results", result.as_str(), "email"])?;

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_send_error)?;

        check_status(response).await?;
        Ok(())
    }
}
