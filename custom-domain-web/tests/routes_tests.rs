#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Route tests against in-memory collaborators.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::from_fn;
use actix_web::{App, test, web};
use custom_domain_app::{AppState, AppStateBuilder};
use custom_domain_core::test_utils::{
    TEST_CREDENTIAL, TEST_PROXY, TestHarness, site_with_custom_domain, site_with_pages,
};
use custom_domain_core::traits::NOT_OWNER_MESSAGE;
use custom_domain_core::types::{LANDING_PAGE_ID_FIELD, SITE_ID_FIELD};
use custom_domain_web::{REQUEST_ID_HEADER, configure, request_span};
use serde_json::{Value, json};

fn state_for(h: &TestHarness) -> AppState {
    AppStateBuilder::new()
        .zone_provider(h.provider.clone())
        .authorization_oracle(h.oracle.clone())
        .key_value_store(h.store.clone())
        .dns_proxy_name(TEST_PROXY)
        .build()
        .unwrap()
}

fn harness() -> TestHarness {
    TestHarness::with_site(site_with_pages(&json!([
        { "id": 5, "metadata": { "navigationItem": true, "index": 0 } },
    ])))
}

async fn call(h: &TestHarness, req: test::TestRequest) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(h)))
            .wrap(from_fn(request_span))
            .configure(configure),
    )
    .await;
    app.call(req.to_request())
        .await
        .unwrap()
        .map_into_boxed_body()
}

async fn json_of(res: ServiceResponse) -> Value {
    test::read_body_json(res).await
}

fn domain_body() -> Value {
    json!({ "siteId": "site-1", "domainName": "Example.com" })
}

#[actix_web::test]
async fn health_needs_no_credential() {
    let h = harness();
    let res = call(&h, test::TestRequest::get().uri("/health")).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_of(res).await, json!({ "status": "ok" }));
}

#[actix_web::test]
async fn create_zone_returns_aggregate() {
    let h = harness();
    let res = call(
        &h,
        test::TestRequest::post()
            .uri("/zones")
            .insert_header(("Authorization", TEST_CREDENTIAL))
            .set_json(domain_body()),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(REQUEST_ID_HEADER));
    let body = json_of(res).await;
    assert_eq!(body["insertKeyPairResult"], json!(true));
    assert_eq!(body["createZoneResult"]["result"]["name"], json!("example.com"));
    assert!(body["addRootDnsResult"]["success"].as_bool().unwrap());
    assert!(body.get("addWwwDnsResult").is_some());
    assert_eq!(
        h.store
            .field("www.example.com", LANDING_PAGE_ID_FIELD)
            .await
            .as_deref(),
        Some("5")
    );
}

#[actix_web::test]
async fn create_zone_without_domain_is_missing_parameter() {
    let h = harness();
    let res = call(
        &h,
        test::TestRequest::post()
            .uri("/zones")
            .insert_header(("Authorization", TEST_CREDENTIAL))
            .set_json(json!({ "siteId": "site-1" })),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_of(res).await,
        json!({ "error": "One or more required parameters missing: {domainName, siteId}" })
    );
    assert_eq!(h.provider.zone_count().await, 0);
}

#[actix_web::test]
async fn create_zone_without_body_is_missing_parameter() {
    let h = harness();
    let res = call(
        &h,
        test::TestRequest::post()
            .uri("/zones")
            .insert_header(("Authorization", TEST_CREDENTIAL)),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn invalid_domain_is_rejected_before_provisioning() {
    let h = harness();
    let res = call(
        &h,
        test::TestRequest::post()
            .uri("/zones")
            .insert_header(("Authorization", TEST_CREDENTIAL))
            .set_json(json!({ "siteId": "site-1", "domainName": "https://example.com/" })),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.oracle.calls().await, 0);
}

#[actix_web::test]
async fn non_owner_gets_401() {
    let h = harness();
    h.oracle.set_current_user("2").await;
    let res = call(
        &h,
        test::TestRequest::post()
            .uri("/zones")
            .insert_header(("Authorization", TEST_CREDENTIAL))
            .set_json(domain_body()),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_of(res).await, json!({ "error": NOT_OWNER_MESSAGE }));
    assert_eq!(h.provider.zone_count().await, 0);
}

#[actix_web::test]
async fn failed_rollback_reports_delete_error() {
    let h = harness();
    h.provider.fail_https().await;
    h.provider.fail_delete().await;
    let res = call(
        &h,
        test::TestRequest::post()
            .uri("/zones")
            .insert_header(("Authorization", TEST_CREDENTIAL))
            .set_json(domain_body()),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_of(res).await;
    assert!(body["error"].is_string());
    assert!(body["deleteZoneError"].is_string());
}

#[actix_web::test]
async fn delete_zone_uses_recorded_zone() {
    let h = TestHarness::with_site(site_with_custom_domain("zone-placeholder", "example.com"));
    let zone_id = h.provider.seed_zone("example.com").await;
    h.oracle
        .set_site(site_with_custom_domain(&zone_id, "example.com"))
        .await;
    h.store.seed("example.com", SITE_ID_FIELD, "site-1").await;

    let res = call(
        &h,
        test::TestRequest::delete()
            .uri("/zones?siteId=site-1")
            .insert_header(("Authorization", TEST_CREDENTIAL)),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        json_of(res).await,
        json!({ "message": "Domain deleted successfully" })
    );
    assert!(!h.provider.has_zone(&zone_id).await);
    assert!(h.store.is_empty().await);
}

#[actix_web::test]
async fn delete_zone_without_site_is_unauthorized() {
    let h = harness();
    let res = call(
        &h,
        test::TestRequest::delete()
            .uri("/zones?zoneId=z1")
            .insert_header(("Authorization", TEST_CREDENTIAL)),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_of(res).await,
        json!({ "error": "One or more required parameters missing: {authHeader, siteId}" })
    );
}

#[actix_web::test]
async fn insert_key_pair_accepts_numeric_site_id() {
    let h = harness();
    let res = call(
        &h,
        test::TestRequest::post()
            .uri("/key-pairs")
            .insert_header(("Authorization", TEST_CREDENTIAL))
            .set_json(json!({ "siteId": 42, "domainName": "example.com" })),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_of(res).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["message"].is_string());
    assert_eq!(
        h.store.field("example.com", SITE_ID_FIELD).await.as_deref(),
        Some("42")
    );
}

#[actix_web::test]
async fn clear_landing_page_keeps_site() {
    let h = harness();
    h.store.seed("example.com", SITE_ID_FIELD, "site-1").await;
    h.store.seed("example.com", LANDING_PAGE_ID_FIELD, "5").await;

    let res = call(
        &h,
        test::TestRequest::delete()
            .uri("/key-pairs/landing-page")
            .insert_header(("Authorization", TEST_CREDENTIAL))
            .set_json(domain_body()),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_of(res).await, json!({ "success": true }));
    assert_eq!(h.store.field("example.com", LANDING_PAGE_ID_FIELD).await, None);
    assert!(h.store.field("example.com", SITE_ID_FIELD).await.is_some());
}

#[actix_web::test]
async fn delete_key_pair_without_credential_is_401() {
    let h = harness();
    h.store.seed("example.com", SITE_ID_FIELD, "site-1").await;

    let res = call(
        &h,
        test::TestRequest::delete()
            .uri("/key-pairs")
            .set_json(domain_body()),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(h.store.field("example.com", SITE_ID_FIELD).await.is_some());
}

#[actix_web::test]
async fn delete_key_pair_removes_record() {
    let h = harness();
    h.store.seed("example.com", SITE_ID_FIELD, "site-1").await;

    let res = call(
        &h,
        test::TestRequest::delete()
            .uri("/key-pairs")
            .insert_header(("Authorization", TEST_CREDENTIAL))
            .set_json(domain_body()),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(h.store.is_empty().await);
}
