//! Provisioning workflow inputs and results

use custom_domain_provider::{DnsRecord, ProviderResponse, Zone, ZoneSetting};
use serde::{Deserialize, Serialize};

use super::DomainName;

/// Store field holding the owning site id.
pub const SITE_ID_FIELD: &str = "siteId";
/// Store field holding the routing target page id.
pub const LANDING_PAGE_ID_FIELD: &str = "landingPageId";

/// Root record name inside a zone.
pub const ROOT_RECORD_NAME: &str = "@";
/// Alias record name inside a zone.
pub const WWW_RECORD_NAME: &str = "www";

/// Inputs shared by every site-scoped operation.
#[derive(Debug, Clone)]
pub struct SiteRequest {
    pub site_id: String,
    /// Caller credential forwarded verbatim to the platform API.
    pub credential: String,
}

impl SiteRequest {
    #[must_use]
    pub fn new(site_id: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            credential: credential.into(),
        }
    }
}

/// Aggregate result of a full zone provisioning.
///
/// `add_www_dns_result` is only present when the optional alias record was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullZoneResult {
    pub create_zone_result: ProviderResponse<Zone>,
    pub add_root_dns_result: ProviderResponse<DnsRecord>,
    pub enable_always_use_https_result: ProviderResponse<ZoneSetting>,
    pub insert_key_pair_result: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_www_dns_result: Option<ProviderResponse<DnsRecord>>,
}

impl FullZoneResult {
    /// Id of the zone that was created.
    #[must_use]
    pub fn zone_id(&self) -> &str {
        &self.create_zone_result.result.id
    }
}

/// Outcome of a full zone teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneTeardown {
    pub zone_id: String,
    /// Domain whose routing keys were targeted, if the site recorded one.
    pub domain_name: Option<DomainName>,
    /// Whether the routing keys were removed. Failures here never fail the teardown.
    pub keys_removed: bool,
}
