use serde::{Deserialize, Serialize};

/// Unified error type for all zone provider operations.
///
/// Each variant includes a `provider` field identifying which provider produced the error.
/// Variants produced from a failed API envelope carry the raw response body so callers can
/// surface exactly what the provider said.
///
/// # Transport Errors
///
/// [`NetworkError`](Self::NetworkError) and [`Timeout`](Self::Timeout) mean the request never
/// produced a usable response. Everything else means the provider answered and refused.
/// Nothing is retried automatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds, if provided by the API.
        retry_after: Option<u64>,
        /// Raw response body.
        raw_body: Option<String>,
    },

    /// The configured credentials were rejected.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Raw response body.
        raw_body: Option<String>,
    },

    /// A zone for this domain already exists on the provider.
    ZoneExists {
        /// Provider that produced the error.
        provider: String,
        /// Domain name of the conflicting zone.
        domain: String,
        /// Raw response body.
        raw_body: Option<String>,
    },

    /// The specified zone was not found.
    ZoneNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Zone identifier that was not found.
        zone_id: String,
        /// Raw response body.
        raw_body: Option<String>,
    },

    /// A DNS record with the same name/type already exists.
    RecordExists {
        /// Provider that produced the error.
        provider: String,
        /// Name of the conflicting record.
        record_name: String,
        /// Raw response body.
        raw_body: Option<String>,
    },

    /// A request parameter was rejected by the provider.
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
        /// Raw response body.
        raw_body: Option<String>,
    },

    /// The provider's response could not be parsed (malformed body or missing `result`).
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
        /// Raw response body.
        raw_body: Option<String>,
    },

    /// An unrecognized error from the provider API.
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
        /// Raw response body.
        raw_body: Option<String>,
    },
}

impl ProviderError {
    /// Whether this is expected behavior (caller input, resource state), used for log levels.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::ZoneExists { .. }
                | Self::ZoneNotFound { .. }
                | Self::RecordExists { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Whether the request failed before the provider produced a response.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }

    /// Raw response body attached to the error, if any.
    #[must_use]
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::NetworkError { .. } | Self::Timeout { .. } => None,
            Self::RateLimited { raw_body, .. }
            | Self::InvalidCredentials { raw_body, .. }
            | Self::ZoneExists { raw_body, .. }
            | Self::ZoneNotFound { raw_body, .. }
            | Self::RecordExists { raw_body, .. }
            | Self::InvalidParameter { raw_body, .. }
            | Self::ParseError { raw_body, .. }
            | Self::Unknown { raw_body, .. } => raw_body.as_deref(),
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::InvalidCredentials { provider, .. } => {
                write!(f, "[{provider}] Invalid credentials")
            }
            Self::ZoneExists {
                provider, domain, ..
            } => {
                write!(f, "[{provider}] Zone '{domain}' already exists")
            }
            Self::ZoneNotFound {
                provider, zone_id, ..
            } => {
                write!(f, "[{provider}] Zone '{zone_id}' not found")
            }
            Self::RecordExists {
                provider,
                record_name,
                ..
            } => {
                write!(f, "[{provider}] Record '{record_name}' already exists")
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
                ..
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::ParseError {
                provider, detail, ..
            } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => {
                write!(f, "[{provider}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
