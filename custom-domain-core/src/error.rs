//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use custom_domain_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Caller omitted one or more required inputs. Holds the `{a, b}` list.
    #[error("One or more required parameters missing: {0}")]
    MissingParameter(String),

    /// Input was present but not usable (e.g. a malformed domain name).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Caller is not the owner of the resource.
    #[error("{0}")]
    AuthorizationError(String),

    /// Network-level failure talking to an external system.
    #[error("{0}")]
    TransportError(String),

    /// A trusted external system answered with something unparseable.
    #[error("{0}")]
    DataError(String),

    /// Key-value store operation failed.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Zone provider error (converted from the provider library)
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// A provisioning step failed and the compensating zone delete failed too.
    #[error("{error} (zone cleanup failed: {delete_zone_error})")]
    RollbackFailed {
        error: Box<CoreError>,
        delete_zone_error: Box<CoreError>,
    },

    /// Authorization step failed; wraps whatever went wrong there.
    #[error("{0}")]
    Unauthorized(Box<CoreError>),
}

impl CoreError {
    /// Build a [`CoreError::MissingParameter`] listing `names` as `{a, b}`.
    #[must_use]
    pub fn missing(names: &[&str]) -> Self {
        Self::MissingParameter(format!("{{{}}}", names.join(", ")))
    }

    /// Whether it is expected behavior (caller input, ownership), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::MissingParameter(_) | Self::ValidationError(_) | Self::AuthorizationError(_) => {
                true
            }
            Self::Provider(e) => e.is_expected(),
            Self::Unauthorized(inner) => inner.is_expected(),
            _ => false,
        }
    }

    /// Whether this error must be reported as an authorization failure.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Message surfaced to the caller.
    ///
    /// Provider failures surface the provider's raw response body when one was captured.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Provider(e) => e.raw_body().map_or_else(|| e.to_string(), str::to_string),
            Self::RollbackFailed { error, .. } => error.client_message(),
            Self::Unauthorized(inner) => inner.client_message(),
            other => other.to_string(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
