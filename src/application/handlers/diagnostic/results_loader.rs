//! ResultsLoader - query handler behind the results view.

use std::sync::Arc;

use crate::domain::analysis::AnalysisResult;
use crate::domain::foundation::ResultRef;
use crate::domain::report::{ReportDocument, ReportRenderer};
use crate::ports::{ApiError, DiagnosticApi, TokenKey, TokenStore, TokenStoreError};

/// What the results view should show.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// No usable result reference; send the user to the landing page.
    RedirectToLanding,
    /// The analysis could not be fetched.
    Unavailable { result_ref: ResultRef, error: ApiError },
    Ready {
        result_ref: ResultRef,
        analysis: AnalysisResult,
        document: ReportDocument,
    },
}

/// Loads and renders the stored result.
pub struct ResultsLoader {
    api: Arc<dyn DiagnosticApi>,
    tokens: Arc<dyn TokenStore>,
    renderer: ReportRenderer,
}

impl ResultsLoader {
    pub fn new(
        api: Arc<dyn DiagnosticApi>,
        tokens: Arc<dyn TokenStore>,
        renderer: ReportRenderer,
    ) -> Self {
        Self {
            api,
            tokens,
            renderer,
        }
    }

    pub async fn load(&self) -> Result<ResultsView, TokenStoreError> {
        let result_ref = match self.tokens.get(TokenKey::ResultRef).await? {
            Some(value) => match ResultRef::new(value) {
                Ok(result_ref) => result_ref,
                Err(_) => return Ok(ResultsView::RedirectToLanding),
            },
            None => {
                tracing::info!("no result reference stored; redirecting to landing");
                return Ok(ResultsView::RedirectToLanding);
            }
        };

        Ok(self.load_ref(result_ref).await)
    }

    /// Loads a specific result, bypassing the token store.
    pub async fn load_ref(&self, result_ref: ResultRef) -> ResultsView {
        match self.api.fetch_analysis(&result_ref).await {
            Ok(analysis) => {
                let missing = analysis.missing_sections();
                if !missing.is_empty() {
                    tracing::warn!(result_ref = %result_ref, ?missing, "analysis incomplete; using placeholders");
                }
                let document = self.renderer.render(&analysis);
                ResultsView::Ready {
                    result_ref,
                    analysis,
                    document,
                }
            }
            Err(error) => {
                tracing::error!(result_ref = %result_ref, %error, "failed to fetch analysis");
                ResultsView::Unavailable { result_ref, error }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryTokenStore, MockCall, MockDiagnosticApi};
    use crate::domain::analysis::{Section, SectionKey};

    fn loader(api: MockDiagnosticApi, tokens: InMemoryTokenStore) -> ResultsLoader {
        ResultsLoader::new(Arc::new(api), Arc::new(tokens), ReportRenderer::default())
    }

    #[tokio::test]
    async fn missing_result_ref_redirects() {
        let api = MockDiagnosticApi::new();
        let view = loader(api.clone(), InMemoryTokenStore::new()).load().await.unwrap();
        assert_eq!(view, ResultsView::RedirectToLanding);
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn stored_result_is_fetched_and_rendered() {
        let api = MockDiagnosticApi::new();
        let tokens = InMemoryTokenStore::with_tokens([(TokenKey::ResultRef, "r-1".to_string())]);

        let view = loader(api.clone(), tokens).load().await.unwrap();

        match view {
            ResultsView::Ready { result_ref, document, .. } => {
                assert_eq!(result_ref.as_str(), "r-1");
                assert_eq!(document.sections.len(), 3);
            }
            other => panic!("expected Ready, got {:?}", other),
        }
        assert_eq!(
            api.calls(),
            vec![MockCall::FetchAnalysis(ResultRef::new("r-1").unwrap())]
        );
    }

    #[tokio::test]
    async fn partial_analysis_renders_placeholder() {
        let partial = AnalysisResult {
            operational_focus: None,
            ..AnalysisResult::new(Section::new("a", "b"), Section::new("c", "d"), Section::new("e", "f"))
        };
        let api = MockDiagnosticApi::new().with_analysis_response(Ok(partial));
        let tokens = InMemoryTokenStore::with_tokens([(TokenKey::ResultRef, "r".to_string())]);

        let view = loader(api, tokens).load().await.unwrap();

        let ResultsView::Ready { document, .. } = view else {
            panic!("expected Ready");
        };
        let section = document.section(SectionKey::OperationalFocus).unwrap();
        assert_eq!(section.title, "Analysis Unavailable");
    }

    #[tokio::test]
    async fn fetch_failure_is_unavailable() {
        let api = MockDiagnosticApi::new()
            .with_analysis_response(Err(ApiError::from_status(404, "Result not found")));
        let tokens = InMemoryTokenStore::with_tokens([(TokenKey::ResultRef, "gone".to_string())]);

        let view = loader(api, tokens).load().await.unwrap();

        assert!(matches!(view, ResultsView::Unavailable { .. }));
    }
}
