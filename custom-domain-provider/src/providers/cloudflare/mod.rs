//! Cloudflare zone provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::providers::common::create_http_client;
use crate::types::{ProviderConfig, ProviderCredentials};

pub(crate) use types::CloudflareResponse;

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
pub(crate) const PROVIDER_NAME: &str = "cloudflare";

/// Cloudflare zone provider
///
/// Authenticates with the account e-mail and global API key. Both headers are built from the
/// [`ProviderConfig`] handed to [`CloudflareProvider::new`]; nothing is read from the environment.
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) endpoint: String,
    pub(crate) auth_email: String,
    pub(crate) auth_key: String,
}

impl CloudflareProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let ProviderCredentials::Cloudflare {
            auth_email,
            auth_key,
        } = config.credentials;

        if auth_email.trim().is_empty() || auth_key.trim().is_empty() {
            return Err(ProviderError::InvalidCredentials {
                provider: PROVIDER_NAME.to_string(),
                raw_body: None,
            });
        }

        Ok(Self {
            client: create_http_client(
                PROVIDER_NAME,
                config.connect_timeout,
                config.request_timeout,
            )?,
            endpoint: config.endpoint.unwrap_or_else(|| CF_API_BASE.to_string()),
            auth_email,
            auth_key,
        })
    }
}
