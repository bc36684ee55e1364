//! Connection settings shared by the backend clients.

use std::time::Duration;

use reqwest::Url;

use crate::ports::ApiError;

/// Default backend location for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for the backend clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Normalized base URL without a trailing slash.
    pub base_url: String,
    /// Request timeout applied to every call.
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.as_ref()),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Joins `path` (leading slash included) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Appends each segment to the base URL path, percent-encoding it so a
    /// reference cannot add segments, a query or a fragment.
    pub fn url_with_segments(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::invalid_response(format!("Invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::invalid_response("Base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Trims whitespace and trailing slashes, and prepends `https://` when no
/// http(s) scheme is present.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_explicit_scheme() {
        assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000");
        assert_eq!(normalize_base_url("HTTPS://api.example.com"), "HTTPS://api.example.com");
    }

    #[test]
    fn adds_https_when_scheme_missing() {
        assert_eq!(normalize_base_url(" api.example.com// "), "https://api.example.com");
    }

    #[test]
    fn url_joins_paths() {
        let config = BackendConfig::new("http://h:1/");
        assert_eq!(config.url("/results/abc"), "http://h:1/results/abc");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn segments_are_percent_encoded() {
        let config = BackendConfig::new("http://h:1");
        let url = config.url_with_segments(&["results", "../admin?x=1#f", "email"]).unwrap();
        assert_eq!(url.as_str(), "http://h:1/results/..%2Fadmin%3Fx=1%23f/email");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn segments_extend_a_base_path() {
        let config = BackendConfig::new("https://api.example.com/v1/");
        let url = config.url_with_segments(&["results", "r 7"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/results/r%207");
    }
}
