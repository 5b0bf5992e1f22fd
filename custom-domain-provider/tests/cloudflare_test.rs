//! Cloudflare provider tests against a mock HTTP server
//!
//! The live test at the bottom needs real credentials:
//! ```bash
//! CLOUDFLARE_ID=xxx CLOUDFLARE_KEY=xxx TEST_DOMAIN=example.com \
//!     cargo test -p custom-domain-provider --test cloudflare_test -- --ignored --nocapture
//! ```

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

mod common;

use common::{TEST_EMAIL, TEST_KEY, error_envelope, live_provider, mock_provider, ok_envelope};
use custom_domain_provider::{CreateDnsRecordRequest, DnsRecordType, ProviderError, ZoneStatus};
use mockito::Matcher;
use serde_json::json;

fn zone_json() -> serde_json::Value {
    json!({
        "id": "023e105f4ecef8ad9ca31a8372d0c353",
        "name": "example.com",
        "status": "pending",
        "name_servers": ["ada.ns.cloudflare.com", "bob.ns.cloudflare.com"]
    })
}

// ============ Success paths ============

#[tokio::test]
async fn create_zone_sends_jump_start_and_auth_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/zones")
        .match_header("x-auth-email", TEST_EMAIL)
        .match_header("x-auth-key", TEST_KEY)
        .match_body(Matcher::Json(json!({
            "name": "example.com",
            "jump_start": true
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ok_envelope(&zone_json()))
        .create_async()
        .await;

    let provider = mock_provider(&server.url());
    let response = provider.create_zone("example.com").await.unwrap();

    mock.assert_async().await;
    assert!(response.success);
    assert_eq!(response.result.id, "023e105f4ecef8ad9ca31a8372d0c353");
    assert_eq!(response.result.status, ZoneStatus::Pending);
    assert_eq!(response.result.name_servers.len(), 2);
}

#[tokio::test]
async fn add_dns_record_posts_proxied_cname() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/zones/z1/dns_records")
        .match_body(Matcher::Json(json!({
            "type": "CNAME",
            "name": "www",
            "content": "proxy.example.net",
            "proxied": true
        })))
        .with_status(200)
        .with_body(ok_envelope(&json!({
            "id": "rec-1",
            "type": "CNAME",
            "name": "www.example.com",
            "content": "proxy.example.net",
            "proxied": true,
            "ttl": 1
        })))
        .create_async()
        .await;

    let provider = mock_provider(&server.url());
    let response = provider
        .add_dns_record(
            "z1",
            &CreateDnsRecordRequest::proxied_cname("www", "proxy.example.net"),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.result.record_type, DnsRecordType::Cname);
    assert_eq!(response.result.proxied, Some(true));
}

#[tokio::test]
async fn always_use_https_patches_setting() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/zones/z1/settings/always_use_https")
        .match_body(Matcher::Json(json!({ "value": "on" })))
        .with_status(200)
        .with_body(ok_envelope(&json!({
            "id": "always_use_https",
            "value": "on",
            "editable": true,
            "modified_on": "2026-01-01T00:00:00Z"
        })))
        .create_async()
        .await;

    let provider = mock_provider(&server.url());
    let response = provider.set_always_use_https("z1", true).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.result.value, "on");
}

#[tokio::test]
async fn delete_zone_returns_deleted_id() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/zones/z1")
        .match_header("x-auth-email", TEST_EMAIL)
        .with_status(200)
        .with_body(ok_envelope(&json!({ "id": "z1" })))
        .create_async()
        .await;

    let provider = mock_provider(&server.url());
    let response = provider.delete_zone("z1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.result.id, "z1");
}

#[tokio::test]
async fn get_zone_reads_status() {
    let mut server = mockito::Server::new_async().await;
    let mut zone = zone_json();
    zone["status"] = json!("active");
    let _mock = server
        .mock("GET", "/zones/z1")
        .with_status(200)
        .with_body(ok_envelope(&zone))
        .create_async()
        .await;

    let provider = mock_provider(&server.url());
    let response = provider.get_zone("z1").await.unwrap();
    assert_eq!(response.result.status, ZoneStatus::Active);
}

#[tokio::test]
async fn provider_reports_its_id() {
    let server = mockito::Server::new_async().await;
    let provider = mock_provider(&server.url());
    assert_eq!(provider.id(), "cloudflare");
}

// ============ Failure paths ============

#[tokio::test]
async fn duplicate_zone_maps_to_zone_exists_with_body() {
    let mut server = mockito::Server::new_async().await;
    let body = error_envelope(1061, "example.com already exists");
    let _mock = server
        .mock("POST", "/zones")
        .with_status(400)
        .with_body(body.clone())
        .create_async()
        .await;

    let provider = mock_provider(&server.url());
    let err = provider.create_zone("example.com").await.unwrap_err();

    assert!(
        matches!(&err, ProviderError::ZoneExists { domain, .. } if domain == "example.com"),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.raw_body(), Some(body.as_str()));
}

#[tokio::test]
async fn rejected_key_maps_to_invalid_credentials() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/zones/z1")
        .with_status(403)
        .with_body(error_envelope(9103, "Unknown X-Auth-Key or X-Auth-Email"))
        .create_async()
        .await;

    let provider = mock_provider(&server.url());
    let err = provider.delete_zone("z1").await.unwrap_err();
    assert!(
        matches!(err, ProviderError::InvalidCredentials { .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn unknown_zone_maps_to_zone_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("PATCH", "/zones/missing/settings/always_use_https")
        .with_status(404)
        .with_body(error_envelope(7003, "Could not route"))
        .create_async()
        .await;

    let provider = mock_provider(&server.url());
    let err = provider
        .set_always_use_https("missing", true)
        .await
        .unwrap_err();
    assert!(
        matches!(&err, ProviderError::ZoneNotFound { zone_id, .. } if zone_id == "missing"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn non_json_body_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/zones")
        .with_status(500)
        .with_body("<html>internal error</html>")
        .create_async()
        .await;

    let provider = mock_provider(&server.url());
    let err = provider.create_zone("example.com").await.unwrap_err();
    assert!(
        matches!(&err, ProviderError::ParseError { .. }),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.raw_body(), Some("<html>internal error</html>"));
}

#[tokio::test]
async fn success_without_result_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/zones/z1")
        .with_status(200)
        .with_body(r#"{"success":true,"errors":[],"messages":[],"result":null}"#)
        .create_async()
        .await;

    let provider = mock_provider(&server.url());
    let err = provider.delete_zone("z1").await.unwrap_err();
    assert!(
        matches!(err, ProviderError::ParseError { .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn rate_limit_is_reported_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/zones")
        .with_status(429)
        .with_header("retry-after", "30")
        .with_body(error_envelope(10100, "rate limited"))
        .expect(1)
        .create_async()
        .await;

    let provider = mock_provider(&server.url());
    let err = provider.create_zone("example.com").await.unwrap_err();

    mock.assert_async().await;
    assert!(
        matches!(
            err,
            ProviderError::RateLimited {
                retry_after: Some(30),
                ..
            }
        ),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn failed_envelope_without_errors_is_unknown() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/zones")
        .with_status(400)
        .with_body(r#"{"success":false}"#)
        .create_async()
        .await;

    let provider = mock_provider(&server.url());
    let err = provider.create_zone("example.com").await.unwrap_err();
    assert!(
        matches!(&err, ProviderError::Unknown { raw_code: None, .. }),
        "unexpected error: {err:?}"
    );
}

// ============ Live ============

#[tokio::test]
#[ignore]
async fn test_cloudflare_zone_lifecycle() {
    skip_if_no_credentials!("CLOUDFLARE_ID", "CLOUDFLARE_KEY", "TEST_DOMAIN");

    let provider = live_provider().expect("provider from environment");
    let domain = std::env::var("TEST_DOMAIN").expect("TEST_DOMAIN");

    let zone = provider
        .create_zone(&domain)
        .await
        .expect("create_zone")
        .result;
    let https = provider.set_always_use_https(&zone.id, true).await;
    let deleted = provider.delete_zone(&zone.id).await.expect("delete_zone");

    assert!(https.is_ok(), "set_always_use_https failed: {https:?}");
    assert_eq!(deleted.result.id, zone.id);
}
