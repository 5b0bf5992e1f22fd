//! Application bootstrap for the custom domain provisioner.
//!
//! Provides `AppConfig` (startup configuration), the production adapters and
//! `AppState` / `AppStateBuilder` (service container and adapter injection).

pub mod adapters;
pub mod config;

use std::sync::Arc;

use custom_domain_core::error::{CoreError, CoreResult};
use custom_domain_core::services::{KeyPairService, ServiceContext, ZoneService};
use custom_domain_core::traits::{AuthorizationOracle, KeyValueStore};
use custom_domain_provider::ZoneProvider;

use crate::adapters::{HttpAuthorizationOracle, RedisKeyValueStore};
use crate::config::{AppConfig, DEFAULT_DNS_PROXY_NAME};

pub use config::{ConfigError, FileConfig, LogFormat, RedisSettings};

/// Application state.
///
/// Built once at startup and shared by every request handler.
pub struct AppState {
    /// Service context (holds all adapters)
    pub ctx: Arc<ServiceContext>,
    /// Zone provisioning workflows
    pub zone_service: ZoneService,
    /// Routing key pair operations
    pub key_pair_service: KeyPairService,
}

impl AppState {
    /// Wire the production adapters from `config`.
    ///
    /// Nothing is contacted here; the Redis URL and HTTP clients are only validated.
    pub fn from_config(config: &AppConfig) -> CoreResult<Self> {
        let zone_provider = custom_domain_provider::create_zone_provider(config.provider_config())?;
        let oracle = HttpAuthorizationOracle::new(&config.api_endpoint, config.request_timeout)?;
        let store = RedisKeyValueStore::new(&config.redis.url(), config.store_timeout)?;

        AppStateBuilder::new()
            .zone_provider(zone_provider)
            .authorization_oracle(Arc::new(oracle))
            .key_value_store(Arc::new(store))
            .dns_proxy_name(config.dns_proxy_name.clone())
            .build()
    }
}

/// Builder for constructing `AppState` with injected adapters.
///
/// # Required adapters
/// - `zone_provider`
/// - `authorization_oracle`
/// - `key_value_store`
///
/// # Optional
/// - `dns_proxy_name`, defaults to [`DEFAULT_DNS_PROXY_NAME`]
#[derive(Default)]
pub struct AppStateBuilder {
    zone_provider: Option<Arc<dyn ZoneProvider>>,
    authorization_oracle: Option<Arc<dyn AuthorizationOracle>>,
    key_value_store: Option<Arc<dyn KeyValueStore>>,
    dns_proxy_name: Option<String>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn zone_provider(mut self, provider: Arc<dyn ZoneProvider>) -> Self {
        self.zone_provider = Some(provider);
        self
    }

    #[must_use]
    pub fn authorization_oracle(mut self, oracle: Arc<dyn AuthorizationOracle>) -> Self {
        self.authorization_oracle = Some(oracle);
        self
    }

    #[must_use]
    pub fn key_value_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.key_value_store = Some(store);
        self
    }

    #[must_use]
    pub fn dns_proxy_name(mut self, name: impl Into<String>) -> Self {
        self.dns_proxy_name = Some(name.into());
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let zone_provider = self
            .zone_provider
            .ok_or_else(|| CoreError::ValidationError("zone_provider is required".to_string()))?;
        let authorization_oracle = self.authorization_oracle.ok_or_else(|| {
            CoreError::ValidationError("authorization_oracle is required".to_string())
        })?;
        let key_value_store = self.key_value_store.ok_or_else(|| {
            CoreError::ValidationError("key_value_store is required".to_string())
        })?;
        let dns_proxy_name = self
            .dns_proxy_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DNS_PROXY_NAME.to_string());

        let ctx = Arc::new(ServiceContext::new(
            zone_provider,
            authorization_oracle,
            key_value_store,
            dns_proxy_name,
        ));

        Ok(AppState {
            zone_service: ZoneService::new(Arc::clone(&ctx)),
            key_pair_service: KeyPairService::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}
