//! Cloudflare error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CloudflareProvider, PROVIDER_NAME};

const UNKNOWN: &str = "<unknown>";

/// Cloudflare error code mapping
/// Reference: <https://developers.cloudflare.com/fundamentals/api/reference/>
impl ProviderErrorMapper for CloudflareProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        map_cloudflare_error(raw, context)
    }
}

pub(crate) fn map_cloudflare_error(raw: RawApiError, context: ErrorContext) -> ProviderError {
    let provider = PROVIDER_NAME.to_string();
    match raw.code.as_deref() {
        // Authentication error
        // 6003: Invalid request headers
        // 6103: Invalid format for X-Auth-Key header
        // 6111: Invalid format for Authorization header
        // 9103: Unknown X-Auth-Key or X-Auth-Email
        // 9109: Unauthorized to access requested resource
        // 10000: Authentication error
        Some("6003" | "6103" | "6111" | "9103" | "9109" | "10000") => {
            ProviderError::InvalidCredentials {
                provider,
                raw_body: raw.body,
            }
        }

        // 1061: <domain> already exists
        Some("1061") => ProviderError::ZoneExists {
            provider,
            domain: context.domain.unwrap_or_else(|| UNKNOWN.to_string()),
            raw_body: raw.body,
        },

        // Zone does not exist
        // 1003: Invalid or missing zone id
        // 7000: No route for that URI
        // 7003: Could not route to /path, perhaps your object identifier is invalid?
        Some("1003" | "7000" | "7003") => ProviderError::ZoneNotFound {
            provider,
            zone_id: context.zone_id.unwrap_or_else(|| UNKNOWN.to_string()),
            raw_body: raw.body,
        },

        // Record already exists
        // 81053: An A, AAAA or CNAME record already exists with that host
        // 81054: A CNAME record with that host already exists
        // 81055: An A record with that host already exists
        // 81056: NS records with that host already exist
        // 81057: The record already exists
        // 81058: A record with those settings already exists
        Some("81053" | "81054" | "81055" | "81056" | "81057" | "81058") => {
            ProviderError::RecordExists {
                provider,
                record_name: context.record_name.unwrap_or_else(|| UNKNOWN.to_string()),
                raw_body: raw.body,
            }
        }

        // Invalid parameter
        // 1004: DNS validation error
        // 1049: <domain> is not a registered domain
        // 9000: Invalid or missing name
        // 9005 / 9006: Invalid record content
        // 9021: Invalid TTL
        // 9041: This DNS record cannot be proxied
        Some(code @ ("1004" | "1049" | "9000" | "9005" | "9006" | "9021" | "9041")) => {
            let param = match code {
                "1049" | "9000" => "name",
                "9005" | "9006" => "content",
                "9021" => "ttl",
                "9041" => "proxied",
                _ => "general",
            };
            ProviderError::InvalidParameter {
                provider,
                param: param.to_string(),
                detail: raw.message,
                raw_body: raw.body,
            }
        }

        _ => ProviderError::Unknown {
            provider,
            raw_code: raw.code,
            raw_message: raw.message,
            raw_body: raw.body,
        },
    }
}
