use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    CreateDnsRecordRequest, DeletedZone, DnsRecord, ProviderResponse, Zone, ZoneSetting,
};

/// Raw API error (internal use)
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code (format differs per provider)
    pub code: Option<String>,
    /// Original error message
    pub message: String,
    /// Full response body the error was extracted from
    pub body: Option<String>,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            body: None,
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Context for error mapping (internal use)
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Domain name (for `ZoneExists`)
    pub domain: Option<String>,
    /// Zone id (for `ZoneNotFound`)
    pub zone_id: Option<String>,
    /// Record name (for `RecordExists`)
    pub record_name: Option<String>,
}

impl ErrorContext {
    pub fn domain(domain: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            ..Self::default()
        }
    }

    pub fn zone(zone_id: &str) -> Self {
        Self {
            zone_id: Some(zone_id.to_string()),
            ..Self::default()
        }
    }

    pub fn record(zone_id: &str, record_name: &str) -> Self {
        Self {
            zone_id: Some(zone_id.to_string()),
            record_name: Some(record_name.to_string()),
            ..Self::default()
        }
    }
}

/// Provider error mapping trait (internal use)
/// Each provider maps its raw API errors onto the unified error type.
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error to the unified error type
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: parse error, keeping the body that failed to parse
    fn parse_error(&self, detail: impl ToString, body: Option<&str>) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
            raw_body: body.map(str::to_string),
        }
    }
}

/// Zone provider trait
///
/// Every method is exactly one request against the provider API. Nothing is retried.
#[async_trait]
pub trait ZoneProvider: Send + Sync {
    /// Provider identifier
    fn id(&self) -> &'static str;

    /// Create a zone for `domain_name` with fast provisioning (`jump_start`) enabled.
    async fn create_zone(&self, domain_name: &str) -> Result<ProviderResponse<Zone>>;

    /// Look up a zone by id.
    async fn get_zone(&self, zone_id: &str) -> Result<ProviderResponse<Zone>>;

    /// Create a DNS record inside a zone.
    async fn add_dns_record(
        &self,
        zone_id: &str,
        req: &CreateDnsRecordRequest,
    ) -> Result<ProviderResponse<DnsRecord>>;

    /// Toggle HTTPS redirection for every request to the zone.
    async fn set_always_use_https(
        &self,
        zone_id: &str,
        on: bool,
    ) -> Result<ProviderResponse<ZoneSetting>>;

    /// Delete a zone and everything under it.
    async fn delete_zone(&self, zone_id: &str) -> Result<ProviderResponse<DeletedZone>>;
}
