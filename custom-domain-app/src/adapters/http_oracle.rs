//! Hosting platform ownership checks over HTTP

use std::time::Duration;

use async_trait::async_trait;
use custom_domain_core::error::{CoreError, CoreResult};
use custom_domain_core::traits::{AuthorizationOracle, UNKNOWN_AUTHOR_MESSAGE};
use custom_domain_core::types::{CurrentUser, Site};
use custom_domain_provider::truncate_for_log;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// [`AuthorizationOracle`] backed by the platform API.
///
/// Both lookups forward the caller's `Authorization` header unchanged.
pub struct HttpAuthorizationOracle {
    client: Client,
    endpoint: String,
}

impl HttpAuthorizationOracle {
    pub fn new(endpoint: impl Into<String>, request_timeout: Duration) -> CoreResult<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(request_timeout))
            .timeout(request_timeout)
            .build()
            .map_err(|e| CoreError::TransportError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, credential: &str) -> CoreResult<T> {
        let url = format!("{}{path}", self.endpoint);
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header("Authorization", credential)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| CoreError::TransportError(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::TransportError(format!("Reading {url} failed: {e}")))?;
        log::debug!("{url} -> {status}: {}", truncate_for_log(&body));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(CoreError::AuthorizationError(format!(
                    "Platform rejected credential ({status})"
                )));
            }
            s if !s.is_success() => {
                return Err(CoreError::DataError(UNKNOWN_AUTHOR_MESSAGE.to_string()));
            }
            _ => {}
        }

        serde_json::from_str(&body).map_err(|e| {
            log::warn!("Unexpected payload from {url}: {e}");
            CoreError::DataError(UNKNOWN_AUTHOR_MESSAGE.to_string())
        })
    }
}

#[async_trait]
impl AuthorizationOracle for HttpAuthorizationOracle {
    async fn fetch_site(&self, site_id: &str, credential: &str) -> CoreResult<Site> {
        let path = format!("/v1/compositions/{}", urlencoding::encode(site_id));
        self.get_json(&path, credential).await
    }

    async fn fetch_current_user(&self, credential: &str) -> CoreResult<CurrentUser> {
        self.get_json("/v1/me", credential).await
    }
}
