//! Full zone provisioning and teardown

use std::sync::Arc;

use custom_domain_provider::{CreateDnsRecordRequest, DnsRecord, ProviderResponse, ZoneSetting};
use futures::future::{join3, join4};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{
    DomainName, FullZoneResult, LANDING_PAGE_ID_FIELD, ROOT_RECORD_NAME, SITE_ID_FIELD,
    SiteRequest, WWW_RECORD_NAME, ZoneTeardown,
};
use crate::utils::best_effort::best_effort;

/// Zone provisioning service
pub struct ZoneService {
    ctx: Arc<ServiceContext>,
}

impl ZoneService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Provision `domain` for the requesting site.
    ///
    /// 1. authorize
    /// 2. create the zone
    /// 3. concurrently: root record, HTTPS redirect, routing keys for the domain and its alias
    /// 4. on any step 3 failure delete the zone once and fail
    /// 5. optionally add the `www` record
    pub async fn create_full_zone(
        &self,
        request: &SiteRequest,
        domain: &DomainName,
    ) -> CoreResult<FullZoneResult> {
        let site = self.ctx.authorize(request).await?;
        let landing_page_id = site.landing_page_id().map(ToString::to_string);
        let provider = &self.ctx.zone_provider;

        log::info!(
            "[{}] Creating zone for {domain} (site {})",
            provider.id(),
            request.site_id
        );
        let create_zone_result = provider.create_zone(domain.as_str()).await.map_err(|e| {
            let err = CoreError::Provider(e);
            log_core_error("create zone", &err);
            err
        })?;
        let zone_id = create_zone_result.result.id.clone();

        let root_record =
            CreateDnsRecordRequest::proxied_cname(ROOT_RECORD_NAME, &self.ctx.dns_proxy_name);
        let (root, https, keys) = join3(
            provider.add_dns_record(&zone_id, &root_record),
            provider.set_always_use_https(&zone_id, true),
            self.write_routing_keys(domain, &request.site_id, landing_page_id.as_deref()),
        )
        .await;

        let (add_root_dns_result, enable_always_use_https_result) =
            match first_failure(root, https, keys) {
                Ok(results) => results,
                Err(error) => return Err(self.roll_back(&zone_id, error).await),
            };

        let www_record =
            CreateDnsRecordRequest::proxied_cname(WWW_RECORD_NAME, &self.ctx.dns_proxy_name);
        let add_www_dns_result = best_effort(
            "add www record",
            provider.add_dns_record(&zone_id, &www_record),
        )
        .await;

        log::info!("Zone {zone_id} provisioned for {domain}");
        Ok(FullZoneResult {
            create_zone_result,
            add_root_dns_result,
            enable_always_use_https_result,
            insert_key_pair_result: true,
            add_www_dns_result,
        })
    }

    /// Tear down the site's custom domain.
    ///
    /// `zone_id` wins over the zone recorded on the site. Routing key removal is best-effort.
    pub async fn delete_full_zone(
        &self,
        request: &SiteRequest,
        zone_id: Option<&str>,
    ) -> CoreResult<ZoneTeardown> {
        let site = self.ctx.authorize(request).await?;
        let custom_domain = site.custom_domain();

        let zone_id = zone_id
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string)
            .or_else(|| custom_domain.and_then(|cd| cd.zone_id.clone()))
            .ok_or_else(|| CoreError::missing(&["zoneId"]))?;

        let domain_name = custom_domain
            .and_then(|cd| cd.domain_name.as_deref())
            .and_then(|name| match DomainName::parse(name) {
                Ok(domain) => Some(domain),
                Err(e) => {
                    log::warn!("Site {} has an unusable custom domain: {e}", request.site_id);
                    None
                }
            });

        log::info!(
            "[{}] Deleting zone {zone_id} (site {})",
            self.ctx.zone_provider.id(),
            request.site_id
        );
        self.ctx
            .zone_provider
            .delete_zone(&zone_id)
            .await
            .map_err(|e| {
                let err = CoreError::Provider(e);
                log_core_error("delete zone", &err);
                err
            })?;

        let keys_removed = match &domain_name {
            Some(domain) => best_effort("remove routing keys", self.remove_routing_keys(domain))
                .await
                .is_some(),
            None => false,
        };

        Ok(ZoneTeardown {
            zone_id,
            domain_name,
            keys_removed,
        })
    }

    /// Write owner and landing page for the domain and its alias, all concurrently.
    ///
    /// Every write runs to completion; the first failure in write order is returned.
    async fn write_routing_keys(
        &self,
        domain: &DomainName,
        site_id: &str,
        landing_page_id: Option<&str>,
    ) -> CoreResult<()> {
        let store = &self.ctx.key_value_store;
        let alias = domain.www_alias();

        let (owner, alias_owner, landing, alias_landing) = join4(
            store.set_field(domain.as_str(), SITE_ID_FIELD, site_id),
            store.set_field(&alias, SITE_ID_FIELD, site_id),
            put_landing_page(self.ctx.as_ref(), domain.as_str(), landing_page_id),
            put_landing_page(self.ctx.as_ref(), &alias, landing_page_id),
        )
        .await;

        owner?;
        alias_owner?;
        landing?;
        alias_landing
    }

    async fn remove_routing_keys(&self, domain: &DomainName) -> CoreResult<()> {
        let store = &self.ctx.key_value_store;
        let primary = store.delete_record(domain.as_str()).await;
        let alias = store.delete_record(&domain.www_alias()).await;
        primary.and(alias)
    }

    /// Compensate a failed step 3 by deleting the zone. Attempted exactly once.
    async fn roll_back(&self, zone_id: &str, error: CoreError) -> CoreError {
        log::warn!(
            "[{}] Provisioning of zone {zone_id} failed, deleting it: {error}",
            self.ctx.zone_provider.id()
        );
        match self.ctx.zone_provider.delete_zone(zone_id).await {
            Ok(_) => error,
            Err(delete_error) => {
                log::error!("Rollback of zone {zone_id} failed: {delete_error}");
                CoreError::RollbackFailed {
                    error: Box::new(error),
                    delete_zone_error: Box::new(CoreError::Provider(delete_error)),
                }
            }
        }
    }
}

/// Write the landing page field, or clear it when the site has no landing page.
pub(crate) async fn put_landing_page(
    ctx: &ServiceContext,
    key: &str,
    landing_page_id: Option<&str>,
) -> CoreResult<()> {
    match landing_page_id {
        Some(id) => {
            ctx.key_value_store
                .set_field(key, LANDING_PAGE_ID_FIELD, id)
                .await
        }
        None => {
            ctx.key_value_store
                .delete_field(key, LANDING_PAGE_ID_FIELD)
                .await
        }
    }
}

type StepResults = (ProviderResponse<DnsRecord>, ProviderResponse<ZoneSetting>);

fn first_failure(
    root: custom_domain_provider::Result<ProviderResponse<DnsRecord>>,
    https: custom_domain_provider::Result<ProviderResponse<ZoneSetting>>,
    keys: CoreResult<()>,
) -> CoreResult<StepResults> {
    let root = root?;
    let https = https?;
    keys?;
    Ok((root, https))
}

fn log_core_error(step: &str, err: &CoreError) {
    if err.is_expected() {
        log::warn!("{step} failed: {err}");
    } else {
        log::error!("{step} failed: {err}");
    }
}
