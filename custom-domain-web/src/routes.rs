//! HTTP routes

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{AUTHORIZATION, HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{HttpRequest, HttpResponse, web};
use custom_domain_app::AppState;
use custom_domain_core::CoreError;
use custom_domain_core::types::{DomainName, ResourceId, SiteRequest};
use serde::Deserialize;
use serde_json::json;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::ApiError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

type ApiResult = Result<HttpResponse, ApiError>;

/// `{siteId, domainName}` request body. `siteId` may be a string or a number.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainBody {
    site_id: Option<ResourceId>,
    domain_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteZoneQuery {
    site_id: Option<String>,
    zone_id: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health)))
        .service(
            web::resource("/zones")
                .route(web::post().to(create_full_zone))
                .route(web::delete().to(delete_full_zone)),
        )
        .service(
            web::resource("/key-pairs/landing-page")
                .route(web::delete().to(clear_landing_page_id)),
        )
        .service(
            web::resource("/key-pairs")
                .route(web::post().to(insert_key_pair))
                .route(web::delete().to(delete_key_pair)),
        );
}

/// Run each request in a span carrying a fresh request id, echoed back in `x-request-id`.
pub async fn request_span(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "request",
        %request_id,
        method = %req.method(),
        path = %req.path(),
    );

    async move {
        let mut res = next.call(req).await?;
        tracing::info!(status = res.status().as_u16(), "Request finished");
        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            res.headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }
        Ok(res)
    }
    .instrument(span)
    .await
}

fn credential(req: &HttpRequest) -> String {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Both body fields are required; a missing or unreadable body counts as both missing.
fn site_and_domain(
    req: &HttpRequest,
    body: Option<web::Json<DomainBody>>,
) -> Result<(SiteRequest, DomainName), ApiError> {
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    let site_id = non_blank(body.site_id.map(|id| id.to_string()));
    let (Some(site_id), Some(domain_name)) = (site_id, non_blank(body.domain_name)) else {
        return Err(CoreError::missing(&["domainName", "siteId"]).into());
    };
    let domain = DomainName::parse(&domain_name)?;
    Ok((SiteRequest::new(site_id, credential(req)), domain))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

async fn create_full_zone(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: Option<web::Json<DomainBody>>,
) -> ApiResult {
    let (request, domain) = site_and_domain(&req, body)?;
    let result = state.zone_service.create_full_zone(&request, &domain).await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn delete_full_zone(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<DeleteZoneQuery>,
) -> ApiResult {
    let query = query.into_inner();
    let request = SiteRequest::new(query.site_id.unwrap_or_default(), credential(&req));
    let teardown = state
        .zone_service
        .delete_full_zone(&request, query.zone_id.as_deref())
        .await?;
    tracing::info!(
        zone_id = %teardown.zone_id,
        domain = teardown.domain_name.as_ref().map_or("-", |d| d.as_str()),
        keys_removed = teardown.keys_removed,
        "Zone torn down"
    );
    Ok(HttpResponse::Ok().json(json!({ "message": "Domain deleted successfully" })))
}

async fn insert_key_pair(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: Option<web::Json<DomainBody>>,
) -> ApiResult {
    let (request, domain) = site_and_domain(&req, body)?;
    state
        .key_pair_service
        .insert_key_pair(&request, &domain)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": format!("{domain} now routes to site {}", request.site_id),
    })))
}

async fn clear_landing_page_id(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: Option<web::Json<DomainBody>>,
) -> ApiResult {
    let (request, domain) = site_and_domain(&req, body)?;
    state
        .key_pair_service
        .clear_landing_page_id(&request, &domain)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

async fn delete_key_pair(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: Option<web::Json<DomainBody>>,
) -> ApiResult {
    let (request, domain) = site_and_domain(&req, body)?;
    state
        .key_pair_service
        .delete_key_pair(&request, &domain)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
