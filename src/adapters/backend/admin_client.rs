//! HTTP implementation of the AdminApi port.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};

use super::dto::{ErrorBody, LoginRequest, LoginSuccess};
use super::{build_client, check_status, decode, map_send_error, BackendConfig};
use crate::ports::{AdminApi, AdminResponseItem, AdminStats, ApiError, LoginResponse};

/// Admin backend client.
#[derive(Debug, Clone)]
pub struct HttpAdminApi {
    config: BackendConfig,
    client: Client,
}

impl HttpAdminApi {
    pub fn new(config: BackendConfig) -> Result<Self, ApiError> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    async fn get_authorized<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.config.url(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(map_send_error)?;

        decode(check_status(response).await?).await
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest {
            email,
            password: password.expose_secret(),
        };

        let response = self
            .client
            .post(self.config.url("/auth/login"))
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            let detail =
                ErrorBody::detail_from(&body).unwrap_or_else(|| "Invalid credentials".to_string());
            return Ok(LoginResponse::Rejected { detail });
        }

        let body: LoginSuccess = decode(check_status(response).await?).await?;
        Ok(LoginResponse::Accepted {
            token: body.access_token,
        })
    }

    async fn stats(&self, token: &str) -> Result<AdminStats, ApiError> {
        self.get_authorized("/admin/stats", token).await
    }

    async fn responses(&self, token: &str) -> Result<Vec<AdminResponseItem>, ApiError> {
        self.get_authorized("/admin/responses", token).await
    }
}
