//! Shared test helpers

#![allow(dead_code)]

use std::time::Duration;

pub const TEST_CREDENTIAL: &str = "Bearer test-token";
pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Skip the test when any of the given environment variables is missing.
#[macro_export]
macro_rules! skip_if_no_env {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Site record as the platform returns it.
pub fn site_json(owner_id: &serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": 42,
        "title": "Portfolio",
        "user": { "id": owner_id, "email": "owner@example.com" },
        "metadata": {
            "customDomain": { "zoneId": "z1", "domainName": "example.com" }
        },
        "pages": [
            { "id": 7, "metadata": { "navigationItem": true, "index": 0 } }
        ]
    })
}
