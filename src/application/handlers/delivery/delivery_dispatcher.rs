//! DeliveryDispatcher - download and email delivery of the clarity report.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::ResultRef;
use crate::domain::report::ReportDocument;
use crate::ports::{ApiError, DiagnosticApi, ExportError, ReportArtifact, ReportExporter};

/// Errors from report delivery. Download availability is never affected by
/// an email failure.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// An email send is already pending.
    #[error("An email delivery is already in progress")]
    InFlight,

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Email delivery failed: {0}")]
    Api(#[from] ApiError),
}

/// Materializes reports and sends them by email.
pub struct DeliveryDispatcher {
    api: Arc<dyn DiagnosticApi>,
    exporter: Arc<dyn ReportExporter>,
    sending: AtomicBool,
}

/// Clears the in-flight flag when the send finishes or is dropped.
struct SendGuard<'a>(&'a AtomicBool);

impl Drop for SendGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl DeliveryDispatcher {
    pub fn new(api: Arc<dyn DiagnosticApi>, exporter: Arc<dyn ReportExporter>) -> Self {
        Self {
            api,
            exporter,
            sending: AtomicBool::new(false),
        }
    }

    /// Encodes the report for local saving. No network involved.
    pub fn download(&self, document: &ReportDocument) -> Result<ReportArtifact, DeliveryError> {
        let artifact = self.exporter.export(document)?;
        tracing::debug!(filename = %artifact.filename, bytes = artifact.len(), "report materialized");
        Ok(artifact)
    }

    /// True while an email send is pending.
    pub fn is_sending(&self) -> bool {
        self.sending.load(Ordering::Acquire)
    }

    /// Encodes the report and posts it to the email endpoint for `result_ref`.
    ///
    /// Only one send may be pending at a time; a second call while one is in
    /// flight returns `InFlight` without touching the network. Never retried.
    pub async fn email_deliver(
        &self,
        result_ref: &ResultRef,
        document: &ReportDocument,
    ) -> Result<(), DeliveryError> {
        if self
            .sending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(DeliveryError::InFlight);
        }
        let _guard = SendGuard(&self.sending);

        let artifact = self.exporter.export(document)?;
        match self.api.email_report(result_ref, &artifact).await {
            Ok(()) => {
                tracing::info!(result_ref = %result_ref, bytes = artifact.len(), "report emailed");
                Ok(())
            }
            Err(error) => {
                tracing::warn!(result_ref = %result_ref, %error, "report email failed");
                Err(error.into())
            }
        }
    }
}
