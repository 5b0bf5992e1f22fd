//! Cloudflare `ZoneProvider` trait implementation

use async_trait::async_trait;
use urlencoding::encode;

use crate::error::Result;
use crate::traits::{ErrorContext, ZoneProvider};
use crate::types::{
    CreateDnsRecordRequest, DeletedZone, DnsRecord, ProviderResponse, Zone, ZoneSetting,
    toggle_value,
};

use super::types::{CreateZoneBody, SettingBody};
use super::{CloudflareProvider, PROVIDER_NAME};

#[async_trait]
impl ZoneProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn create_zone(&self, domain_name: &str) -> Result<ProviderResponse<Zone>> {
        let body = CreateZoneBody {
            name: domain_name,
            jump_start: true,
        };
        self.post("/zones", &body, ErrorContext::domain(domain_name))
            .await
    }

    async fn get_zone(&self, zone_id: &str) -> Result<ProviderResponse<Zone>> {
        self.get(
            &format!("/zones/{}", encode(zone_id)),
            ErrorContext::zone(zone_id),
        )
        .await
    }

    async fn add_dns_record(
        &self,
        zone_id: &str,
        req: &CreateDnsRecordRequest,
    ) -> Result<ProviderResponse<DnsRecord>> {
        self.post(
            &format!("/zones/{}/dns_records", encode(zone_id)),
            req,
            ErrorContext::record(zone_id, &req.name),
        )
        .await
    }

    async fn set_always_use_https(
        &self,
        zone_id: &str,
        on: bool,
    ) -> Result<ProviderResponse<ZoneSetting>> {
        let body = SettingBody {
            value: toggle_value(on),
        };
        self.patch(
            &format!("/zones/{}/settings/always_use_https", encode(zone_id)),
            &body,
            ErrorContext::zone(zone_id),
        )
        .await
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<ProviderResponse<DeletedZone>> {
        self.delete(
            &format!("/zones/{}", encode(zone_id)),
            ErrorContext::zone(zone_id),
        )
        .await
    }
}
