//! Backend Adapters - reqwest clients for the diagnostic and admin APIs.
//!
//! # Configuration
//!
//! ```ignore
//! let config = BackendConfig::new("api.example.com")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let diagnostic = HttpDiagnosticApi::new(config.clone())?;
//! let admin = HttpAdminApi::new(config)?;
//! ```

mod admin_client;
mod config;
mod diagnostic_client;
mod dto;
mod mock;

pub use admin_client::HttpAdminApi;
pub use config::{normalize_base_url, BackendConfig};
pub use diagnostic_client::HttpDiagnosticApi;
pub use mock::{MockAdminApi, MockCall, MockDiagnosticApi};

use reqwest::{Client, Response};

use crate::ports::ApiError;

/// Builds the shared reqwest client.
fn build_client(config: &BackendConfig) -> Result<Client, ApiError> {
    Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {}", e)))
}

/// Maps transport failures.
fn map_send_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::timeout(e.to_string())
    } else if e.is_connect() {
        ApiError::network(format!("Connection failed: {}", e))
    } else {
        ApiError::network(e.to_string())
    }
}

/// Passes successful responses through; turns error statuses into `ApiError`.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = dto::ErrorBody::detail_from(&body)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    Err(ApiError::from_status(status.as_u16(), message))
}

/// Decodes a JSON body into `T`.
async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::invalid_response(format!("Failed to parse response: {}", e)))
}
