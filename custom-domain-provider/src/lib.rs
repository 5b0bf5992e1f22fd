//! # custom-domain-provider
//!
//! Zone provider abstraction used to provision custom domains for hosted sites.
//!
//! A zone provider owns authoritative DNS for a customer's domain and fronts it with a proxy.
//! This crate exposes the handful of calls needed to bring such a domain online and take it
//! down again:
//!
//! - create a zone (with fast provisioning),
//! - add a proxied CNAME record,
//! - toggle HTTPS redirection,
//! - delete a zone.
//!
//! ## Supported Providers
//!
//! | Provider | Auth Method |
//! |----------|-------------|
//! | [Cloudflare](https://www.cloudflare.com/) | `X-Auth-Email` + `X-Auth-Key` |
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use custom_domain_provider::{
//!     CreateDnsRecordRequest, ProviderConfig, ProviderCredentials, create_zone_provider,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProviderConfig::new(ProviderCredentials::Cloudflare {
//!         auth_email: "ops@example.com".to_string(),
//!         auth_key: "global-api-key".to_string(),
//!     });
//!     let provider = create_zone_provider(config)?;
//!
//!     let zone = provider.create_zone("example.com").await?.result;
//!     provider
//!         .add_dns_record(
//!             &zone.id,
//!             &CreateDnsRecordRequest::proxied_cname("@", "proxy.example.net"),
//!         )
//!         .await?;
//!     provider.set_always_use_https(&zone.id, true).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Errors produced from a
//! failed provider envelope keep the raw response body (see [`ProviderError::raw_body`]).
//! Requests are never retried.

mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

use std::sync::Arc;

pub use error::{ProviderError, Result};
pub use traits::ZoneProvider;
pub use types::{
    ApiMessage, CreateDnsRecordRequest, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT,
    DeletedZone, DnsRecord, DnsRecordType, ProviderConfig, ProviderCredentials,
    ProviderResponse, Zone, ZoneSetting, ZoneStatus, toggle_value,
};
pub use utils::log_sanitizer::{mask_secret, truncate_for_log};

pub use providers::CloudflareProvider;

/// Create a zone provider instance from its configuration.
///
/// # Errors
///
/// Returns [`ProviderError::InvalidCredentials`] for blank credentials and
/// [`ProviderError::NetworkError`] when the HTTP client cannot be built.
pub fn create_zone_provider(config: ProviderConfig) -> Result<Arc<dyn ZoneProvider>> {
    match config.credentials {
        ProviderCredentials::Cloudflare { .. } => Ok(Arc::new(CloudflareProvider::new(config)?)),
    }
}
