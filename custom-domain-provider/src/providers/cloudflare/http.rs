//! Cloudflare HTTP request methods

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::common::join_url;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::types::ProviderResponse;

use super::{CloudflareProvider, CloudflareResponse, PROVIDER_NAME};

impl CloudflareProvider {
    fn authorized(&self, rb: RequestBuilder) -> RequestBuilder {
        rb.header("X-Auth-Email", &self.auth_email)
            .header("X-Auth-Key", &self.auth_key)
            .header("Content-Type", "application/json")
    }

    /// Execute a GET request
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        ctx: ErrorContext,
    ) -> Result<ProviderResponse<T>> {
        let url = join_url(&self.endpoint, path);
        let rb = self.authorized(self.client.get(&url));
        self.send(rb, "GET", &url, ctx).await
    }

    /// Execute a POST request
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<ProviderResponse<T>> {
        let url = join_url(&self.endpoint, path);
        log_body(body);
        let rb = self.authorized(self.client.post(&url)).json(body);
        self.send(rb, "POST", &url, ctx).await
    }

    /// Execute a PATCH request
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<ProviderResponse<T>> {
        let url = join_url(&self.endpoint, path);
        log_body(body);
        let rb = self.authorized(self.client.patch(&url)).json(body);
        self.send(rb, "PATCH", &url, ctx).await
    }

    /// Execute a DELETE request
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        ctx: ErrorContext,
    ) -> Result<ProviderResponse<T>> {
        let url = join_url(&self.endpoint, path);
        let rb = self.authorized(self.client.delete(&url));
        self.send(rb, "DELETE", &url, ctx).await
    }

    /// Send once and unwrap the envelope.
    ///
    /// A `success: false` envelope is mapped through the first entry of `errors`, keeping the
    /// full body on the resulting error. Cloudflare answers 4xx with an envelope too, so the
    /// HTTP status alone decides nothing here.
    async fn send<T: DeserializeOwned>(
        &self,
        rb: RequestBuilder,
        method: &str,
        url: &str,
        ctx: ErrorContext,
    ) -> Result<ProviderResponse<T>> {
        let (_status, body) = HttpUtils::execute_request(rb, PROVIDER_NAME, method, url).await?;

        let envelope: CloudflareResponse<T> = HttpUtils::parse_json(&body, PROVIDER_NAME)?;

        if !envelope.success {
            let (code, message) = envelope
                .errors
                .as_ref()
                .and_then(|errors| {
                    errors
                        .first()
                        .map(|e| (e.code.to_string(), e.message.clone()))
                })
                .unwrap_or_else(|| (String::new(), "Unknown error".to_string()));
            log::error!("[{PROVIDER_NAME}] API error {code}: {message}");
            let raw = if code.is_empty() {
                RawApiError::new(message)
            } else {
                RawApiError::with_code(code, message)
            };
            return Err(self.map_error(raw.body(body), ctx));
        }

        let Some(result) = envelope.result else {
            return Err(self.parse_error("Missing result field in response", Some(&body)));
        };

        Ok(ProviderResponse {
            success: true,
            errors: envelope.errors.unwrap_or_default(),
            messages: envelope.messages.unwrap_or_default(),
            result,
        })
    }
}

fn log_body<B: Serialize>(body: &B) {
    if log::log_enabled!(log::Level::Debug) {
        let body_json = serde_json::to_string(body)
            .unwrap_or_else(|_| "<unserializable request body>".to_string());
        log::debug!("[{PROVIDER_NAME}] Request Body: {body_json}");
    }
}
