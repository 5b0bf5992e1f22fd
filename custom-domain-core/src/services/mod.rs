//! Business logic service layer

mod key_pair_service;
mod zone_service;

pub use key_pair_service::KeyPairService;
pub use zone_service::ZoneService;

use std::sync::Arc;

use custom_domain_provider::ZoneProvider;

use crate::error::{CoreError, CoreResult};
use crate::traits::{AuthorizationOracle, KeyValueStore};
use crate::types::{Site, SiteRequest};

/// Service context - holds all dependencies
///
/// The platform layer builds this once at startup and injects its adapters.
pub struct ServiceContext {
    /// Zone provider client
    pub zone_provider: Arc<dyn ZoneProvider>,
    /// Ownership checks against the hosting platform
    pub authorization_oracle: Arc<dyn AuthorizationOracle>,
    /// Domain routing store
    pub key_value_store: Arc<dyn KeyValueStore>,
    /// Hostname every custom domain is CNAMEd to
    pub dns_proxy_name: String,
}

impl ServiceContext {
    /// Create service context
    #[must_use]
    pub fn new(
        zone_provider: Arc<dyn ZoneProvider>,
        authorization_oracle: Arc<dyn AuthorizationOracle>,
        key_value_store: Arc<dyn KeyValueStore>,
        dns_proxy_name: impl Into<String>,
    ) -> Self {
        Self {
            zone_provider,
            authorization_oracle,
            key_value_store,
            dns_proxy_name: dns_proxy_name.into(),
        }
    }

    /// Gate in front of every operation.
    ///
    /// Any failure, including transport and parse failures, is reported as
    /// [`CoreError::Unauthorized`].
    pub async fn authorize(&self, request: &SiteRequest) -> CoreResult<Site> {
        if request.site_id.trim().is_empty() || request.credential.trim().is_empty() {
            return Err(CoreError::Unauthorized(Box::new(CoreError::missing(&[
                "authHeader",
                "siteId",
            ]))));
        }

        self.authorization_oracle
            .authorize(&request.site_id, &request.credential)
            .await
            .map_err(|e| {
                if e.is_expected() {
                    log::warn!("Authorization failed for site {}: {e}", request.site_id);
                } else {
                    log::error!("Authorization failed for site {}: {e}", request.site_id);
                }
                CoreError::Unauthorized(Box::new(e))
            })
    }
}
