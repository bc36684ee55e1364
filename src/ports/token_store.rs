//! Token Store Port - durable process-wide key-value store for session tokens.
//!
//! Holds the only state that outlives a diagnostic session: the lead
//! reference, the result reference and the admin bearer token.
//!
//! # Lifecycle
//!
//! - `lead_id` is written once when a lead registers (a new session begins)
//! - `result_id` is written once when answers are submitted
//! - both are read by later steps and cleared only when a new session starts
//! - `admin_token` is written on admin login and cleared on logout or 401

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed names under which tokens are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenKey {
    #[serde(rename = "lead_id")]
    LeadRef,
    #[serde(rename = "result_id")]
    ResultRef,
    #[serde(rename = "admin_token")]
    AdminToken,
}

impl TokenKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKey::LeadRef => "lead_id",
            TokenKey::ResultRef => "result_id",
            TokenKey::AdminToken => "admin_token",
        }
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during token storage operations
#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error("Failed to serialize tokens: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize tokens: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for the durable token store.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns the stored value, or `None` if unset.
    async fn get(&self, key: TokenKey) -> Result<Option<String>, TokenStoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: TokenKey, value: &str) -> Result<(), TokenStoreError>;

    /// Removes `key`. Clearing an unset key is not an error.
    async fn clear(&self, key: TokenKey) -> Result<(), TokenStoreError>;
}
