//! Test helper module
//!
//! In-memory collaborators with failure injection, plus factory helpers.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use custom_domain_provider::{
    CreateDnsRecordRequest, DeletedZone, DnsRecord, ProviderError, ProviderResponse,
    Result as ProviderResult, Zone, ZoneProvider, ZoneSetting, ZoneStatus, toggle_value,
};
use serde_json::{Value, json};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{AuthorizationOracle, KeyValueStore};
use crate::types::{CurrentUser, DomainName, ResourceId, Site};

pub const TEST_CREDENTIAL: &str = "Bearer test-token";
pub const TEST_PROXY: &str = "proxy.test.invalid";
/// Owner id of every test site (stored as a JSON number).
pub const OWNER_ID: &str = "1";

const MOCK_PROVIDER: &str = "mock";

// ===== MockKeyValueStore =====

type Records = HashMap<String, HashMap<String, String>>;

pub struct MockKeyValueStore {
    records: RwLock<Records>,
    /// If Some, every operation fails with this message
    fail_all: RwLock<Option<String>>,
    /// Field name -> message; writes/deletes of that field fail
    fail_fields: RwLock<HashMap<String, String>>,
    /// Key -> message; `delete_record` of that key fails
    fail_keys: RwLock<HashMap<String, String>>,
}

impl MockKeyValueStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            fail_all: RwLock::new(None),
            fail_fields: RwLock::new(HashMap::new()),
            fail_keys: RwLock::new(HashMap::new()),
        }
    }

    pub async fn fail_writes(&self, msg: &str) {
        *self.fail_all.write().await = Some(msg.to_string());
    }

    pub async fn fail_delete_key(&self, key: &str, msg: &str) {
        self.fail_keys
            .write()
            .await
            .insert(key.to_string(), msg.to_string());
    }

    pub async fn fail_field(&self, field: &str, msg: &str) {
        self.fail_fields
            .write()
            .await
            .insert(field.to_string(), msg.to_string());
    }

    /// Insert directly, bypassing failure injection.
    pub async fn seed(&self, key: &str, field: &str, value: &str) {
        self.records
            .write()
            .await
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
    }

    pub async fn field(&self, key: &str, field: &str) -> Option<String> {
        self.records
            .read()
            .await
            .get(key)
            .and_then(|fields| fields.get(field).cloned())
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn snapshot(&self) -> Records {
        self.records.read().await.clone()
    }

    async fn check(&self, field: Option<&str>) -> CoreResult<()> {
        if let Some(msg) = self.fail_all.read().await.as_ref() {
            return Err(CoreError::StorageError(msg.clone()));
        }
        if let Some(field) = field
            && let Some(msg) = self.fail_fields.read().await.get(field)
        {
            return Err(CoreError::StorageError(msg.clone()));
        }
        Ok(())
    }
}

impl Default for MockKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MockKeyValueStore {
    async fn set_field(&self, key: &str, field: &str, value: &str) -> CoreResult<()> {
        self.check(Some(field)).await?;
        self.seed(key, field, value).await;
        Ok(())
    }

    async fn delete_field(&self, key: &str, field: &str) -> CoreResult<()> {
        self.check(Some(field)).await?;
        let mut records = self.records.write().await;
        if let Some(fields) = records.get_mut(key) {
            fields.remove(field);
            // An empty hash does not exist
            if fields.is_empty() {
                records.remove(key);
            }
        }
        Ok(())
    }

    async fn delete_record(&self, key: &str) -> CoreResult<()> {
        self.check(None).await?;
        if let Some(msg) = self.fail_keys.read().await.get(key) {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.records.write().await.remove(key);
        Ok(())
    }
}

// ===== MockAuthorizationOracle =====

pub struct MockAuthorizationOracle {
    site: RwLock<Site>,
    current_user: RwLock<ResourceId>,
    transport_error: RwLock<Option<String>>,
    calls: RwLock<usize>,
}

impl MockAuthorizationOracle {
    pub fn new(site: Site) -> Self {
        Self {
            site: RwLock::new(site),
            current_user: RwLock::new(ResourceId::new(OWNER_ID)),
            transport_error: RwLock::new(None),
            calls: RwLock::new(0),
        }
    }

    pub async fn set_site(&self, site: Site) {
        *self.site.write().await = site;
    }

    pub async fn set_current_user(&self, id: &str) {
        *self.current_user.write().await = ResourceId::new(id);
    }

    pub async fn fail_with_transport(&self, msg: &str) {
        *self.transport_error.write().await = Some(msg.to_string());
    }

    /// Number of site fetches performed.
    pub async fn calls(&self) -> usize {
        *self.calls.read().await
    }
}

#[async_trait]
impl AuthorizationOracle for MockAuthorizationOracle {
    async fn fetch_site(&self, _site_id: &str, _credential: &str) -> CoreResult<Site> {
        *self.calls.write().await += 1;
        if let Some(msg) = self.transport_error.read().await.as_ref() {
            return Err(CoreError::TransportError(msg.clone()));
        }
        Ok(self.site.read().await.clone())
    }

    async fn fetch_current_user(&self, _credential: &str) -> CoreResult<CurrentUser> {
        Ok(CurrentUser {
            id: self.current_user.read().await.clone(),
        })
    }
}

// ===== MockZoneProvider =====

struct MockZone {
    name: String,
    always_use_https: bool,
    records: Vec<CreateDnsRecordRequest>,
}

#[derive(Default)]
struct Failures {
    create: bool,
    https: bool,
    delete: bool,
    records: HashSet<String>,
}

#[derive(Default)]
struct Counters {
    next_id: u64,
    https_calls: usize,
    delete_calls: usize,
    created: Vec<String>,
}

pub struct MockZoneProvider {
    zones: RwLock<HashMap<String, MockZone>>,
    failures: RwLock<Failures>,
    counters: RwLock<Counters>,
}

impl MockZoneProvider {
    pub fn new() -> Self {
        Self {
            zones: RwLock::new(HashMap::new()),
            failures: RwLock::new(Failures::default()),
            counters: RwLock::new(Counters::default()),
        }
    }

    pub async fn fail_create(&self) {
        self.failures.write().await.create = true;
    }

    pub async fn fail_https(&self) {
        self.failures.write().await.https = true;
    }

    pub async fn fail_delete(&self) {
        self.failures.write().await.delete = true;
    }

    /// Fail record creation for the given relative name (`@` or `www`).
    pub async fn fail_record(&self, name: &str) {
        self.failures.write().await.records.insert(name.to_string());
    }

    /// Create a zone without going through the trait.
    pub async fn seed_zone(&self, domain: &str) -> String {
        let id = self.next_id().await;
        self.zones.write().await.insert(
            id.clone(),
            MockZone {
                name: domain.to_string(),
                always_use_https: false,
                records: Vec::new(),
            },
        );
        id
    }

    pub async fn zone_count(&self) -> usize {
        self.zones.read().await.len()
    }

    pub async fn has_zone(&self, zone_id: &str) -> bool {
        self.zones.read().await.contains_key(zone_id)
    }

    pub async fn records(&self, zone_id: &str) -> Vec<CreateDnsRecordRequest> {
        self.zones
            .read()
            .await
            .get(zone_id)
            .map(|z| z.records.clone())
            .unwrap_or_default()
    }

    pub async fn always_use_https(&self, zone_id: &str) -> bool {
        self.zones
            .read()
            .await
            .get(zone_id)
            .is_some_and(|z| z.always_use_https)
    }

    pub async fn delete_calls(&self) -> usize {
        self.counters.read().await.delete_calls
    }

    pub async fn https_calls(&self) -> usize {
        self.counters.read().await.https_calls
    }

    /// Ids of zones created through `create_zone`, in order.
    pub async fn created_zone_ids(&self) -> Vec<String> {
        self.counters.read().await.created.clone()
    }

    async fn next_id(&self) -> String {
        let mut counters = self.counters.write().await;
        counters.next_id += 1;
        format!("zone-{}", counters.next_id)
    }

    fn not_found(zone_id: &str) -> ProviderError {
        ProviderError::ZoneNotFound {
            provider: MOCK_PROVIDER.to_string(),
            zone_id: zone_id.to_string(),
            raw_body: Some(r#"{"success":false,"errors":[{"code":7003}]}"#.to_string()),
        }
    }
}

impl Default for MockZoneProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn ok<T>(result: T) -> ProviderResponse<T> {
    ProviderResponse {
        success: true,
        errors: Vec::new(),
        messages: Vec::new(),
        result,
    }
}

#[async_trait]
impl ZoneProvider for MockZoneProvider {
    fn id(&self) -> &'static str {
        MOCK_PROVIDER
    }

    async fn create_zone(&self, domain_name: &str) -> ProviderResult<ProviderResponse<Zone>> {
        if self.failures.read().await.create {
            return Err(ProviderError::ZoneExists {
                provider: MOCK_PROVIDER.to_string(),
                domain: domain_name.to_string(),
                raw_body: Some(r#"{"success":false,"errors":[{"code":1061}]}"#.to_string()),
            });
        }
        let id = self.seed_zone(domain_name).await;
        self.counters.write().await.created.push(id.clone());
        Ok(ok(Zone {
            id,
            name: domain_name.to_string(),
            status: ZoneStatus::Pending,
            name_servers: vec!["ns1.mock.invalid".to_string()],
        }))
    }

    async fn get_zone(&self, zone_id: &str) -> ProviderResult<ProviderResponse<Zone>> {
        let zones = self.zones.read().await;
        let zone = zones.get(zone_id).ok_or_else(|| Self::not_found(zone_id))?;
        Ok(ok(Zone {
            id: zone_id.to_string(),
            name: zone.name.clone(),
            status: ZoneStatus::Active,
            name_servers: Vec::new(),
        }))
    }

    async fn add_dns_record(
        &self,
        zone_id: &str,
        req: &CreateDnsRecordRequest,
    ) -> ProviderResult<ProviderResponse<DnsRecord>> {
        if self.failures.read().await.records.contains(&req.name) {
            return Err(ProviderError::RecordExists {
                provider: MOCK_PROVIDER.to_string(),
                record_name: req.name.clone(),
                raw_body: None,
            });
        }
        let mut zones = self.zones.write().await;
        let zone = zones
            .get_mut(zone_id)
            .ok_or_else(|| Self::not_found(zone_id))?;
        zone.records.push(req.clone());
        let name = if req.name == "@" {
            zone.name.clone()
        } else {
            format!("{}.{}", req.name, zone.name)
        };
        Ok(ok(DnsRecord {
            id: format!("rec-{}", zone.records.len()),
            record_type: req.record_type,
            name,
            content: req.content.clone(),
            proxied: Some(req.proxied),
            ttl: Some(1),
        }))
    }

    async fn set_always_use_https(
        &self,
        zone_id: &str,
        on: bool,
    ) -> ProviderResult<ProviderResponse<ZoneSetting>> {
        self.counters.write().await.https_calls += 1;
        if self.failures.read().await.https {
            return Err(ProviderError::NetworkError {
                provider: MOCK_PROVIDER.to_string(),
                detail: "connection reset by peer".to_string(),
            });
        }
        let mut zones = self.zones.write().await;
        let zone = zones
            .get_mut(zone_id)
            .ok_or_else(|| Self::not_found(zone_id))?;
        zone.always_use_https = on;
        Ok(ok(ZoneSetting {
            id: "always_use_https".to_string(),
            value: toggle_value(on).to_string(),
            editable: Some(true),
            modified_on: None,
        }))
    }

    async fn delete_zone(&self, zone_id: &str) -> ProviderResult<ProviderResponse<DeletedZone>> {
        self.counters.write().await.delete_calls += 1;
        if self.failures.read().await.delete {
            return Err(ProviderError::Timeout {
                provider: MOCK_PROVIDER.to_string(),
                detail: "operation timed out".to_string(),
            });
        }
        self.zones
            .write()
            .await
            .remove(zone_id)
            .ok_or_else(|| Self::not_found(zone_id))?;
        Ok(ok(DeletedZone {
            id: zone_id.to_string(),
        }))
    }
}

// ===== Factory methods =====

/// All mocks wired into one `ServiceContext`.
pub struct TestHarness {
    pub ctx: Arc<ServiceContext>,
    pub provider: Arc<MockZoneProvider>,
    pub oracle: Arc<MockAuthorizationOracle>,
    pub store: Arc<MockKeyValueStore>,
}

impl TestHarness {
    /// Harness whose oracle serves `site` and accepts its owner.
    pub fn with_site(site: Site) -> Self {
        let provider = Arc::new(MockZoneProvider::new());
        let oracle = Arc::new(MockAuthorizationOracle::new(site));
        let store = Arc::new(MockKeyValueStore::new());
        let ctx = Arc::new(ServiceContext::new(
            provider.clone(),
            oracle.clone(),
            store.clone(),
            TEST_PROXY,
        ));
        Self {
            ctx,
            provider,
            oracle,
            store,
        }
    }
}

fn site_from_json(value: Value) -> Site {
    serde_json::from_value(value).unwrap_or_else(|e| panic!("invalid test site: {e}"))
}

/// Site owned by [`OWNER_ID`] with the given `pages` array.
pub fn site_with_pages(pages: &Value) -> Site {
    site_from_json(json!({
        "id": "site-1",
        "user": { "id": 1 },
        "metadata": {},
        "pages": pages,
    }))
}

/// Site owned by [`OWNER_ID`] that already has a custom domain.
pub fn site_with_custom_domain(zone_id: &str, domain_name: &str) -> Site {
    site_from_json(json!({
        "id": "site-1",
        "user": { "id": 1 },
        "metadata": { "customDomain": { "zoneId": zone_id, "domainName": domain_name } },
        "pages": [],
    }))
}

pub fn test_domain() -> DomainName {
    DomainName::parse("example.com").unwrap_or_else(|e| panic!("invalid test domain: {e}"))
}
