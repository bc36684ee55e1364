//! Backend API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::backend::{normalize_base_url, BackendConfig};

/// Diagnostic backend location and transport settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL; a missing scheme defaults to https
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Base URL with scheme and without a trailing slash
    pub fn normalized_base_url(&self) -> String {
        normalize_base_url(&self.base_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Settings for the backend clients
    pub fn backend(&self) -> BackendConfig {
        BackendConfig::new(&self.base_url).with_timeout(self.timeout())
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ValidationError::MissingRequired("API__BASE_URL"));
        }
        let host = self
            .normalized_base_url()
            .splitn(2, "://")
            .nth(1)
            .unwrap_or_default()
            .to_string();
        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
