//! HTTP integration tests for the backend clients.
//!
//! An in-process axum server stands in for the diagnostic backend. These
//! tests verify:
//! 1. Request bodies and paths match the backend contract
//! 2. Status codes map onto `ApiErrorCode`
//! 3. The report upload is a multipart `file` field with filename and type
//! 4. Admin bearer handling, including session expiry on 401

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::{json, Value};

use founder_compass::adapters::{
    BackendConfig, HttpAdminApi, HttpDiagnosticApi, InMemoryTokenStore,
};
use founder_compass::application::{AdminConsole, AdminError};
use founder_compass::domain::analysis::SectionKey;
use founder_compass::domain::diagnostic::AnswerStore;
use founder_compass::domain::foundation::{LeadRef, ResultRef};
use founder_compass::domain::lead::{CompanySizeBand, LeadRegistration};
use founder_compass::ports::{
    AdminApi, ApiErrorCode, DiagnosticApi, ExportFormat, LoginResponse, ReportArtifact, TokenKey,
    TokenStore,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

const ADMIN_EMAIL: &str = "ops@example.com";
const ADMIN_PASSWORD: &str = "hunter2";
const ADMIN_TOKEN: &str = "stub-token";

#[derive(Debug, Clone)]
struct Upload {
    result_id: String,
    field: String,
    filename: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct Recorded {
    leads: Vec<Value>,
    submissions: Vec<Value>,
    uploads: Vec<Upload>,
    /// When set, admin endpoints answer 401 regardless of the token.
    revoke_tokens: bool,
}

type Shared = Arc<Mutex<Recorded>>;

async fn create_lead(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    if body.get("email").and_then(Value::as_str) == Some("taken@example.com") {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": "Email already registered"})),
        )
            .into_response();
    }
    state.lock().unwrap().leads.push(body);
    Json(json!({"id": "lead-42"})).into_response()
}

async fn submit_responses(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    state.lock().unwrap().submissions.push(body);
    Json(json!({"result_id": "result-7"})).into_response()
}

async fn get_result(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "result-7" => Json(json!({
            "result_id": "result-7",
            "analysis": {
                "mindset_shift": {"title": "From Doer to Leader", "description": "Delegate."},
                "operational_focus": {"title": "Sales Engine", "description": "Hire."},
                "next_move": {"title": "Pick One Channel", "description": "Focus."}
            }
        }))
        .into_response(),
        "partial" => Json(json!({
            "result_id": "partial",
            "analysis": {
                "mindset_shift": {"title": "From Doer to Leader", "description": "Delegate."}
            }
        }))
        .into_response(),
        "broken" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({})).into_response()
        }
        "crash" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Result not found"})),
        )
            .into_response(),
    }
}

async fn email_result(
    State(state): State<Shared>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let upload = Upload {
            result_id: id.clone(),
            field: field.name().unwrap_or_default().to_string(),
            filename: field.file_name().map(str::to_string),
            content_type: field.content_type().map(str::to_string),
            bytes: field.bytes().await.unwrap().to_vec(),
        };
        state.lock().unwrap().uploads.push(upload);
    }
    Json(json!({"status": "sent"})).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body.get("email").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);
    if email == Some(ADMIN_EMAIL) && password == Some(ADMIN_PASSWORD) {
        Json(json!({"access_token": ADMIN_TOKEN, "token_type": "bearer"})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Incorrect email or password"})),
        )
            .into_response()
    }
}

fn authorized(state: &Shared, headers: &HeaderMap) -> bool {
    if state.lock().unwrap().revoke_tokens {
        return false;
    }
    let expected = format!("Bearer {}", ADMIN_TOKEN);
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some(expected.as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Could not validate credentials"})),
    )
        .into_response()
}

async fn admin_stats(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    Json(json!({"total_leads": 10, "total_responses": 4, "completion_rate": 40.0})).into_response()
}

async fn admin_responses(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    Json(json!([{
        "id": "resp-1",
        "name": "Ada",
        "email": "ada@example.com",
        "answers": {"q1": "Hiring"},
        "created_at": "2024-05-01T12:00:00Z"
    }]))
    .into_response()
}

struct StubBackend {
    addr: SocketAddr,
    state: Shared,
}

impl StubBackend {
    async fn spawn() -> Self {
        let state = Shared::default();
        let app = Router::new()
            .route("/leads", post(create_lead))
            .route("/responses", post(submit_responses))
            .route("/results/:id", get(get_result))
            .route("/results/:id/email", post(email_result))
            .route("/auth/login", post(login))
            .route("/admin/stats", get(admin_stats))
            .route("/admin/responses", get(admin_responses))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    fn config(&self) -> BackendConfig {
        BackendConfig::new(format!("http://{}", self.addr))
    }

    fn diagnostic_api(&self) -> HttpDiagnosticApi {
        HttpDiagnosticApi::new(self.config()).unwrap()
    }

    fn admin_api(&self) -> HttpAdminApi {
        HttpAdminApi::new(self.config()).unwrap()
    }

    fn recorded<T>(&self, f: impl FnOnce(&Recorded) -> T) -> T {
        f(&self.state.lock().unwrap())
    }
}

// =============================================================================
// Diagnostic API
// =============================================================================

#[tokio::test]
async fn register_lead_posts_registration_body() {
    let backend = StubBackend::spawn().await;
    let api = backend.diagnostic_api();

    let lead = LeadRegistration::new("Ada", "ada@example.com", CompanySizeBand::From36To60);
    let lead_ref = api.register_lead(&lead).await.unwrap();

    assert_eq!(lead_ref.as_str(), "lead-42");
    backend.recorded(|r| {
        assert_eq!(r.leads.len(), 1);
        assert_eq!(r.leads[0]["name"], "Ada");
        assert_eq!(r.leads[0]["email"], "ada@example.com");
        assert_eq!(r.leads[0]["company_size"], CompanySizeBand::From36To60.as_str());
    });
}

#[tokio::test]
async fn rejected_lead_maps_to_rejected_with_detail() {
    let backend = StubBackend::spawn().await;
    let api = backend.diagnostic_api();

    let lead = LeadRegistration::new("Ada", "taken@example.com", CompanySizeBand::From15To35);
    let err = api.register_lead(&lead).await.unwrap_err();

    assert_eq!(err.code, ApiErrorCode::Rejected);
    assert_eq!(err.status, Some(422));
    assert!(err.message.contains("Email already registered"));
}

#[tokio::test]
async fn submit_answers_sends_lead_id_and_answer_map() {
    let backend = StubBackend::spawn().await;
    let api = backend.diagnostic_api();

    let mut answers = AnswerStore::new();
    answers.set("q1", "Hiring");
    answers.set("q2", "Very Confident");
    let lead = LeadRef::new("lead-42").unwrap();

    let result_ref = api.submit_answers(&lead, &answers).await.unwrap();

    assert_eq!(result_ref.as_str(), "result-7");
    backend.recorded(|r| {
        assert_eq!(
            r.submissions[0],
            json!({
                "lead_id": "lead-42",
                "answers": {"q1": "Hiring", "q2": "Very Confident"}
            })
        );
    });
}

#[tokio::test]
async fn fetch_analysis_reads_all_sections() {
    let backend = StubBackend::spawn().await;
    let api = backend.diagnostic_api();

    let analysis = api
        .fetch_analysis(&ResultRef::new("result-7").unwrap())
        .await
        .unwrap();

    assert!(analysis.is_complete());
    assert_eq!(
        analysis.get(SectionKey::OperationalFocus).unwrap().title,
        "Sales Engine"
    );
}

#[tokio::test]
async fn fetch_analysis_tolerates_missing_sections() {
    let backend = StubBackend::spawn().await;
    let api = backend.diagnostic_api();

    let analysis = api
        .fetch_analysis(&ResultRef::new("partial").unwrap())
        .await
        .unwrap();

    assert_eq!(
        analysis.missing_sections(),
        vec![SectionKey::OperationalFocus, SectionKey::NextMove]
    );
}

#[tokio::test]
async fn fetch_analysis_error_statuses() {
    let backend = StubBackend::spawn().await;
    let api = backend.diagnostic_api();

    let missing = api
        .fetch_analysis(&ResultRef::new("nope").unwrap())
        .await
        .unwrap_err();
    assert_eq!(missing.code, ApiErrorCode::NotFound);

    let crashed = api
        .fetch_analysis(&ResultRef::new("crash").unwrap())
        .await
        .unwrap_err();
    assert_eq!(crashed.code, ApiErrorCode::Server);
    assert_eq!(crashed.status, Some(500));

    let broken = api
        .fetch_analysis(&ResultRef::new("broken").unwrap())
        .await
        .unwrap_err();
    assert_eq!(broken.code, ApiErrorCode::InvalidResponse);
}

#[tokio::test]
async fn slow_backend_times_out() {
    let backend = StubBackend::spawn().await;
    let api =
        HttpDiagnosticApi::new(backend.config().with_timeout(Duration::from_millis(200))).unwrap();

    let err = api
        .fetch_analysis(&ResultRef::new("slow").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.code, ApiErrorCode::Timeout);
}

#[tokio::test]
async fn email_report_uploads_file_part() {
    let backend = StubBackend::spawn().await;
    let api = backend.diagnostic_api();
    let artifact = ReportArtifact::new(b"%PDF-1.4 stub".to_vec(), ExportFormat::Pdf);

    api.email_report(&ResultRef::new("result-7").unwrap(), &artifact)
        .await
        .unwrap();

    backend.recorded(|r| {
        assert_eq!(r.uploads.len(), 1);
        let upload = &r.uploads[0];
        assert_eq!(upload.result_id, "result-7");
        assert_eq!(upload.field, "file");
        assert_eq!(upload.filename.as_deref(), Some("founder-clarity-report.pdf"));
        assert_eq!(upload.content_type.as_deref(), Some("application/pdf"));
        assert_eq!(upload.bytes, b"%PDF-1.4 stub");
    });
}

#[tokio::test]
async fn result_reference_stays_one_path_segment() {
    let backend = StubBackend::spawn().await;
    let api = backend.diagnostic_api();
    let odd = ResultRef::new("../odd/ref?x=1#top").unwrap();
    let artifact = ReportArtifact::new(b"%PDF-1.4 stub".to_vec(), ExportFormat::Pdf);

    api.email_report(&odd, &artifact).await.unwrap();
    let err = api.fetch_analysis(&odd).await.unwrap_err();

    assert_eq!(err.code, ApiErrorCode::NotFound);
    backend.recorded(|r| {
        assert_eq!(r.uploads.len(), 1);
        assert_eq!(r.uploads[0].result_id, "../odd/ref?x=1#top");
    });
}

#[tokio::test]
async fn base_url_with_trailing_slash_still_routes() {
    let backend = StubBackend::spawn().await;
    let api =
        HttpDiagnosticApi::new(BackendConfig::new(format!("  http://{}/  ", backend.addr)))
            .unwrap();

    let analysis = api
        .fetch_analysis(&ResultRef::new("result-7").unwrap())
        .await
        .unwrap();

    assert!(analysis.is_complete());
}

// =============================================================================
// Admin API
// =============================================================================

#[tokio::test]
async fn admin_login_accepts_and_rejects() {
    let backend = StubBackend::spawn().await;
    let api = backend.admin_api();

    let accepted = api
        .login(ADMIN_EMAIL, &SecretString::new(ADMIN_PASSWORD.to_string()))
        .await
        .unwrap();
    assert_eq!(
        accepted,
        LoginResponse::Accepted {
            token: ADMIN_TOKEN.to_string()
        }
    );

    let rejected = api
        .login(ADMIN_EMAIL, &SecretString::new("wrong".to_string()))
        .await
        .unwrap();
    assert_eq!(
        rejected,
        LoginResponse::Rejected {
            detail: "Incorrect email or password".to_string()
        }
    );
}

#[tokio::test]
async fn admin_console_lists_stats_and_responses() {
    let backend = StubBackend::spawn().await;
    let tokens = Arc::new(InMemoryTokenStore::new());
    let console = AdminConsole::new(Arc::new(backend.admin_api()), tokens.clone());

    console
        .login(ADMIN_EMAIL, &SecretString::new(ADMIN_PASSWORD.to_string()))
        .await
        .unwrap();
    assert_eq!(
        tokens.get(TokenKey::AdminToken).await.unwrap().as_deref(),
        Some(ADMIN_TOKEN)
    );

    let stats = console.stats().await.unwrap();
    assert_eq!(stats.total_leads, 10);
    assert_eq!(stats.total_responses, 4);
    assert!((stats.completion_rate - 40.0).abs() < f64::EPSILON);

    let responses = console.responses().await.unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].answers.get("q1").map(String::as_str), Some("Hiring"));
}

#[tokio::test]
async fn admin_console_clears_token_on_401() {
    let backend = StubBackend::spawn().await;
    let tokens = Arc::new(InMemoryTokenStore::new());
    let console = AdminConsole::new(Arc::new(backend.admin_api()), tokens.clone());
    console
        .login(ADMIN_EMAIL, &SecretString::new(ADMIN_PASSWORD.to_string()))
        .await
        .unwrap();

    backend.state.lock().unwrap().revoke_tokens = true;

    assert!(matches!(
        console.stats().await,
        Err(AdminError::SessionExpired)
    ));
    assert_eq!(tokens.get(TokenKey::AdminToken).await.unwrap(), None);
    assert!(matches!(
        console.responses().await,
        Err(AdminError::NotLoggedIn)
    ));
}

#[tokio::test]
async fn admin_console_surfaces_rejected_login() {
    let backend = StubBackend::spawn().await;
    let tokens = Arc::new(InMemoryTokenStore::new());
    let console = AdminConsole::new(Arc::new(backend.admin_api()), tokens.clone());

    let err = console
        .login(ADMIN_EMAIL, &SecretString::new("wrong".to_string()))
        .await
        .unwrap_err();

    match err {
        AdminError::LoginRejected { detail } => {
            assert_eq!(detail, "Incorrect email or password")
        }
        other => panic!("expected LoginRejected, got {:?}", other),
    }
    assert!(!console.is_logged_in().await.unwrap());
}
