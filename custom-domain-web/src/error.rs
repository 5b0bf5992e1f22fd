//! Error to HTTP response mapping

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use custom_domain_core::CoreError;
use serde_json::json;

/// Handler error.
///
/// Authorization failures answer 401, everything else 400. The body is always
/// `{"error": "..."}`, plus `deleteZoneError` when a rollback also failed.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        if self.0.is_unauthorized() {
            StatusCode::UNAUTHORIZED
        } else {
            StatusCode::BAD_REQUEST
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match &self.0 {
            CoreError::RollbackFailed {
                error,
                delete_zone_error,
            } => json!({
                "error": error.client_message(),
                "deleteZoneError": delete_zone_error.client_message(),
            }),
            other => json!({ "error": other.client_message() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
