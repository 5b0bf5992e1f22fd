use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============ Response Envelope ============

/// A single entry of the provider's `errors` / `messages` arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Provider-specific numeric code.
    pub code: i64,
    /// Human readable message.
    pub message: String,
}

/// Parsed success envelope returned by every zone provider call.
///
/// Only successful envelopes reach the caller; a `success: false` envelope is turned into a
/// [`ProviderError`](crate::ProviderError) carrying the raw body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse<T> {
    /// Always `true` for values returned from the client.
    pub success: bool,
    /// Non-fatal errors reported next to a successful result.
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    /// Informational messages.
    #[serde(default)]
    pub messages: Vec<ApiMessage>,
    /// The operation's result payload.
    pub result: T,
}

// ============ Zone ============

/// Provider-side zone lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    /// Name servers verified, zone serving traffic.
    Active,
    /// Waiting for the registrar to point at the provider's name servers.
    Pending,
    /// Zone is being set up.
    Initializing,
    /// Zone was moved to another account.
    Moved,
    /// Zone was deleted.
    Deleted,
    /// Any status this crate does not know about.
    #[serde(other)]
    Unknown,
}

/// A DNS zone as returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// Opaque zone identifier.
    pub id: String,
    /// Domain name the zone serves.
    pub name: String,
    /// Zone status.
    pub status: ZoneStatus,
    /// Name servers assigned by the provider.
    #[serde(default)]
    pub name_servers: Vec<String>,
}

/// Result of a zone deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedZone {
    /// Identifier of the deleted zone.
    pub id: String,
}

// ============ DNS Record ============

/// DNS record types the provisioner creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    A,
    Aaaa,
    Cname,
    Txt,
}

/// Request body for creating a DNS record inside a zone.
///
/// `name` is relative to the zone: `@` for the apex, `www` for the alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDnsRecordRequest {
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    pub name: String,
    pub content: String,
    pub proxied: bool,
}

impl CreateDnsRecordRequest {
    /// Proxied CNAME pointing `name` at `target`.
    #[must_use]
    pub fn proxied_cname(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            record_type: DnsRecordType::Cname,
            name: name.into(),
            content: target.into(),
            proxied: true,
        }
    }
}

/// A DNS record as returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    /// Fully qualified record name.
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub proxied: Option<bool>,
    #[serde(default)]
    pub ttl: Option<u32>,
}

// ============ Zone Settings ============

/// A zone setting value such as `always_use_https`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSetting {
    /// Setting identifier.
    pub id: String,
    /// Current value (`"on"` / `"off"` for toggles).
    pub value: String,
    #[serde(default)]
    pub editable: Option<bool>,
    #[serde(default)]
    pub modified_on: Option<String>,
}

/// Maps a toggle to the provider's `"on"` / `"off"` wire value.
#[must_use]
pub fn toggle_value(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

// ============ Credentials / Config ============

/// Credentials for a zone provider account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
#[serde(rename_all = "lowercase")]
pub enum ProviderCredentials {
    /// Cloudflare global API key authentication (`X-Auth-Email` / `X-Auth-Key`).
    Cloudflare {
        /// Account e-mail (`CLOUDFLARE_ID`).
        auth_email: String,
        /// Global API key (`CLOUDFLARE_KEY`).
        auth_key: String,
    },
}

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default whole-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to build a zone provider client, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Account credentials.
    pub credentials: ProviderCredentials,
    /// API base URL override; `None` uses the provider's public endpoint.
    pub endpoint: Option<String>,
    /// Connect timeout for each request.
    pub connect_timeout: Duration,
    /// Whole-request timeout for each request.
    pub request_timeout: Duration,
}

impl ProviderConfig {
    /// Config with default endpoint and timeouts.
    #[must_use]
    pub fn new(credentials: ProviderCredentials) -> Self {
        Self {
            credentials,
            endpoint: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
