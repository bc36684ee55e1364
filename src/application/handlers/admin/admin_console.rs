//! AdminConsole - operator login, dashboard figures and response listing.
//!
//! The bearer token lives in the token store under `admin_token`. Any 401
//! from the backend is treated as session expiry: the token is cleared and
//! the caller must log in again. Nothing is retried.

use std::sync::Arc;

use secrecy::SecretString;
use thiserror::Error;

use crate::ports::{
    AdminApi, AdminResponseItem, AdminStats, ApiError, LoginResponse, TokenKey, TokenStore,
    TokenStoreError,
};

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Admin session expired; log in again")]
    SessionExpired,

    #[error("Login failed: {detail}")]
    LoginRejected { detail: String },

    #[error("Admin request failed: {0}")]
    Api(#[from] ApiError),

    #[error("Token storage failed: {0}")]
    Storage(#[from] TokenStoreError),
}

pub struct AdminConsole {
    api: Arc<dyn AdminApi>,
    tokens: Arc<dyn TokenStore>,
}

impl AdminConsole {
    pub fn new(api: Arc<dyn AdminApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }

    pub async fn login(&self, email: &str, password: &SecretString) -> Result<(), AdminError> {
        match self.api.login(email, password).await? {
            LoginResponse::Accepted { token } => {
                self.tokens.set(TokenKey::AdminToken, &token).await?;
                tracing::info!(email, "admin logged in");
                Ok(())
            }
            LoginResponse::Rejected { detail } => {
                tracing::warn!(email, %detail, "admin login rejected");
                Err(AdminError::LoginRejected { detail })
            }
        }
    }

    pub async fn logout(&self) -> Result<(), AdminError> {
        self.tokens.clear(TokenKey::AdminToken).await?;
        Ok(())
    }

    pub async fn is_logged_in(&self) -> Result<bool, AdminError> {
        Ok(self.tokens.get(TokenKey::AdminToken).await?.is_some())
    }

    pub async fn stats(&self) -> Result<AdminStats, AdminError> {
        let token = self.token().await?;
        let result = self.api.stats(&token).await;
        self.check(result).await
    }

    pub async fn responses(&self) -> Result<Vec<AdminResponseItem>, AdminError> {
        let token = self.token().await?;
        let result = self.api.responses(&token).await;
        self.check(result).await
    }

    async fn token(&self) -> Result<String, AdminError> {
        self.tokens
            .get(TokenKey::AdminToken)
            .await?
            .ok_or(AdminError::NotLoggedIn)
    }

    async fn check<T>(&self, result: Result<T, ApiError>) -> Result<T, AdminError> {
        match result {
            Ok(value) => Ok(value),
            Err(error) if error.is_unauthorized() => {
                tracing::info!("admin token rejected; clearing session");
                self.tokens.clear(TokenKey::AdminToken).await?;
                Err(AdminError::SessionExpired)
            }
            Err(error) => Err(error.into()),
        }
    }
}
