//! Shared test helpers

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use custom_domain_provider::{
    ProviderConfig, ProviderCredentials, ZoneProvider, create_zone_provider,
};

pub const TEST_EMAIL: &str = "ops@example.com";
pub const TEST_KEY: &str = "global-api-key";

/// Skip the test when any of the given environment variables is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Provider pointed at a mock server.
pub fn mock_provider(endpoint: &str) -> Arc<dyn ZoneProvider> {
    let config = ProviderConfig::new(ProviderCredentials::Cloudflare {
        auth_email: TEST_EMAIL.to_string(),
        auth_key: TEST_KEY.to_string(),
    })
    .with_endpoint(endpoint)
    .with_request_timeout(Duration::from_secs(5));
    create_zone_provider(config).expect("provider should build")
}

/// Provider talking to the real API, configured from the environment.
pub fn live_provider() -> Option<Arc<dyn ZoneProvider>> {
    let auth_email = std::env::var("CLOUDFLARE_ID").ok()?;
    let auth_key = std::env::var("CLOUDFLARE_KEY").ok()?;
    let config = ProviderConfig::new(ProviderCredentials::Cloudflare {
        auth_email,
        auth_key,
    });
    create_zone_provider(config).ok()
}

/// Success envelope around `result`.
pub fn ok_envelope(result: &serde_json::Value) -> String {
    serde_json::json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result,
    })
    .to_string()
}

/// Failure envelope with a single error entry.
pub fn error_envelope(code: i64, message: &str) -> String {
    serde_json::json!({
        "success": false,
        "errors": [{ "code": code, "message": message }],
        "messages": [],
        "result": null,
    })
    .to_string()
}
