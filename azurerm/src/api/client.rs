use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::error::ApiError;
use super::lro::LongRunningOperation;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Azure-style REST API client.
///
/// Probes issued through this client are single-shot: status codes map
/// straight to results with no retry or backoff layer. Convergence waiting
/// belongs to the apply engine, not to existence checks.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl Client {
    pub fn new(endpoint: &str, access_token: &str) -> Result<Self, ApiError> {
        url::Url::parse(endpoint).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                base_url: endpoint.trim_end_matches('/').to_string(),
                auth_header: format!("Bearer {}", access_token),
            }),
        })
    }

    /// Build a client from ARM_ENDPOINT / ARM_ACCESS_TOKEN
    pub fn from_env() -> Result<Self, ApiError> {
        let endpoint = std::env::var("ARM_ENDPOINT")
            .map_err(|_| ApiError::InvalidUrl("ARM_ENDPOINT is not set".to_string()))?;
        let access_token = std::env::var("ARM_ACCESS_TOKEN")
            .map_err(|_| ApiError::Auth)?;
        Self::new(&endpoint, &access_token)
    }

    /// Network API operations
    pub fn network(&self) -> crate::api::network::NetworkApi<'_> {
        crate::api::network::NetworkApi::new(self)
    }

    /// Execute a single GET request
    pub async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.inner.base_url, path);
        tracing::debug!("GET request to: {}", url);

        let response = self
            .inner
            .http_client
            .get(&url)
            .header(AUTHORIZATION, &self.inner.auth_header)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }

        let text = response.text().await?;
        serde_json::from_str::<T>(&text).map_err(|e| {
            tracing::error!("Failed to deserialize response: {}, body: {}", e, text);
            ApiError::Parse(format!("Failed to parse response: {}", e))
        })
    }

    /// Execute a single DELETE request. Azure answers 202 with an
    /// Azure-AsyncOperation polling URL for asynchronous deletions, or
    /// 200/204 when the deletion completed inline.
    pub async fn delete(&self, path: &str) -> Result<LongRunningOperation, ApiError> {
        let url = format!("{}{}", self.inner.base_url, path);
        tracing::debug!("DELETE request to: {}", url);

        let response = self
            .inner
            .http_client
            .delete(&url)
            .header(AUTHORIZATION, &self.inner.auth_header)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::ACCEPTED {
            let poll_url = response
                .headers()
                .get("azure-asyncoperation")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
                .ok_or(ApiError::MissingOperationUrl)?;
            return Ok(LongRunningOperation::pending(self.clone(), poll_url));
        }

        if status.is_success() {
            return Ok(LongRunningOperation::completed());
        }

        Err(Self::status_error(status, response).await)
    }

    /// Poll an absolute URL, used by long-running operations. Also returns
    /// the Retry-After hint when the backend sent one.
    pub(crate) async fn get_absolute<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
    ) -> Result<(T, Option<Duration>), ApiError> {
        tracing::debug!("GET request to: {}", url);

        let response = self
            .inner
            .http_client
            .get(url)
            .header(AUTHORIZATION, &self.inner.auth_header)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs);

        let text = response.text().await?;
        let parsed = serde_json::from_str::<T>(&text)
            .map_err(|e| ApiError::Parse(format!("Failed to parse response: {}", e)))?;
        Ok((parsed, retry_after))
    }

    async fn status_error(status: reqwest::StatusCode, response: reqwest::Response) -> ApiError {
        match status {
            reqwest::StatusCode::NOT_FOUND => ApiError::NotFound,
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => ApiError::Auth,
            reqwest::StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
            _ => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                ApiError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}
