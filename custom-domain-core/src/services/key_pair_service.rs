//! Domain routing key pairs

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::services::zone_service::put_landing_page;
use crate::types::{DomainName, LANDING_PAGE_ID_FIELD, SITE_ID_FIELD, SiteRequest};

/// Routing key pair service
///
/// Manages the `domain -> {siteId, landingPageId}` entries used to route requests for a
/// custom domain to a site. Unlike [`ZoneService`](super::ZoneService) these operations only
/// touch the given key, never its `www.` alias.
pub struct KeyPairService {
    ctx: Arc<ServiceContext>,
}

impl KeyPairService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Point `domain` at the requesting site and its landing page.
    ///
    /// Owner first, then landing page. A failed second write leaves the first in place.
    pub async fn insert_key_pair(
        &self,
        request: &SiteRequest,
        domain: &DomainName,
    ) -> CoreResult<()> {
        let site = self.ctx.authorize(request).await?;
        let landing_page_id = site.landing_page_id().map(ToString::to_string);

        self.ctx
            .key_value_store
            .set_field(domain.as_str(), SITE_ID_FIELD, &request.site_id)
            .await?;
        put_landing_page(&self.ctx, domain.as_str(), landing_page_id.as_deref()).await?;

        log::info!(
            "Key pair for {domain} -> site {} (landing page {})",
            request.site_id,
            landing_page_id.as_deref().unwrap_or("none")
        );
        Ok(())
    }

    /// Remove only the landing page of `domain`.
    pub async fn clear_landing_page_id(
        &self,
        request: &SiteRequest,
        domain: &DomainName,
    ) -> CoreResult<()> {
        self.ctx.authorize(request).await?;
        self.ctx
            .key_value_store
            .delete_field(domain.as_str(), LANDING_PAGE_ID_FIELD)
            .await
    }

    /// Remove the whole entry for `domain`. The `www.` alias entry is kept.
    pub async fn delete_key_pair(
        &self,
        request: &SiteRequest,
        domain: &DomainName,
    ) -> CoreResult<()> {
        self.ctx.authorize(request).await?;
        self.ctx
            .key_value_store
            .delete_record(domain.as_str())
            .await?;
        log::info!("Key pair for {domain} deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::test_utils::{TEST_CREDENTIAL, TestHarness, site_with_pages, test_domain};
    use crate::traits::KeyValueStore;
    use serde_json::json;

    fn request() -> SiteRequest {
        SiteRequest::new("site-1", TEST_CREDENTIAL)
    }

    fn harness() -> TestHarness {
        TestHarness::with_site(site_with_pages(&json!([
            { "id": 11, "metadata": { "navigationItem": true, "index": 0 } },
        ])))
    }

    #[tokio::test]
    async fn insert_writes_owner_and_landing_page() {
        let h = harness();
        let svc = KeyPairService::new(h.ctx.clone());

        svc.insert_key_pair(&request(), &test_domain()).await.unwrap();

        assert_eq!(
            h.store.field("example.com", SITE_ID_FIELD).await.as_deref(),
            Some("site-1")
        );
        assert_eq!(
            h.store
                .field("example.com", LANDING_PAGE_ID_FIELD)
                .await
                .as_deref(),
            Some("11")
        );
        assert_eq!(h.store.field("www.example.com", SITE_ID_FIELD).await, None);
    }

    #[tokio::test]
    async fn failed_landing_write_keeps_owner() {
        let h = harness();
        h.store
            .fail_field(LANDING_PAGE_ID_FIELD, "connection reset")
            .await;
        let svc = KeyPairService::new(h.ctx.clone());

        let err = svc
            .insert_key_pair(&request(), &test_domain())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::StorageError(_)));
        assert_eq!(
            h.store.field("example.com", SITE_ID_FIELD).await.as_deref(),
            Some("site-1")
        );
    }

    #[tokio::test]
    async fn failed_owner_write_aborts() {
        let h = harness();
        h.store.fail_field(SITE_ID_FIELD, "connection reset").await;
        let svc = KeyPairService::new(h.ctx.clone());

        assert!(svc.insert_key_pair(&request(), &test_domain()).await.is_err());
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn set_field_is_idempotent() {
        let h = harness();
        h.store
            .set_field("example.com", SITE_ID_FIELD, "site-1")
            .await
            .unwrap();
        let once = h.store.snapshot().await;
        h.store
            .set_field("example.com", SITE_ID_FIELD, "site-1")
            .await
            .unwrap();
        assert_eq!(h.store.snapshot().await, once);
    }

    #[tokio::test]
    async fn clear_landing_page_keeps_owner() {
        let h = harness();
        h.store.seed("example.com", SITE_ID_FIELD, "site-1").await;
        h.store.seed("example.com", LANDING_PAGE_ID_FIELD, "11").await;
        let svc = KeyPairService::new(h.ctx.clone());

        svc.clear_landing_page_id(&request(), &test_domain())
            .await
            .unwrap();

        assert_eq!(h.store.field("example.com", LANDING_PAGE_ID_FIELD).await, None);
        assert_eq!(
            h.store.field("example.com", SITE_ID_FIELD).await.as_deref(),
            Some("site-1")
        );
    }

    #[tokio::test]
    async fn delete_removes_only_primary_key() {
        let h = harness();
        h.store.seed("example.com", SITE_ID_FIELD, "site-1").await;
        h.store.seed("www.example.com", SITE_ID_FIELD, "site-1").await;
        let svc = KeyPairService::new(h.ctx.clone());

        svc.delete_key_pair(&request(), &test_domain()).await.unwrap();

        assert_eq!(h.store.field("example.com", SITE_ID_FIELD).await, None);
        assert_eq!(
            h.store.field("www.example.com", SITE_ID_FIELD).await.as_deref(),
            Some("site-1")
        );
    }

    #[tokio::test]
    async fn every_operation_requires_ownership() {
        let h = harness();
        h.oracle.set_current_user("intruder").await;
        h.store.seed("example.com", SITE_ID_FIELD, "site-1").await;
        let svc = KeyPairService::new(h.ctx.clone());
        let domain = test_domain();

        let results = [
            svc.insert_key_pair(&request(), &domain).await,
            svc.clear_landing_page_id(&request(), &domain).await,
            svc.delete_key_pair(&request(), &domain).await,
        ];

        assert!(
            results
                .iter()
                .all(|r| matches!(r, Err(e) if e.is_unauthorized()))
        );
        assert_eq!(
            h.store.field("example.com", SITE_ID_FIELD).await.as_deref(),
            Some("site-1")
        );
    }

    #[tokio::test]
    async fn blank_credential_is_unauthorized() {
        let h = harness();
        let svc = KeyPairService::new(h.ctx.clone());

        let err = svc
            .delete_key_pair(&SiteRequest::new("site-1", ""), &test_domain())
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(h.oracle.calls().await, 0);
    }
}
