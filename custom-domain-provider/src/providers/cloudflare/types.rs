//! Cloudflare API wire types

use serde::{Deserialize, Serialize};

use crate::types::ApiMessage;

/// Cloudflare API envelope as it arrives on the wire.
///
/// Every field is optional so a failed envelope with missing parts still parses.
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    pub errors: Option<Vec<ApiMessage>>,
    pub messages: Option<Vec<ApiMessage>>,
}

/// `POST /zones` body
#[derive(Debug, Serialize)]
pub struct CreateZoneBody<'a> {
    pub name: &'a str,
    pub jump_start: bool,
}

/// `PATCH /zones/{id}/settings/{setting}` body
#[derive(Debug, Serialize)]
pub struct SettingBody<'a> {
    pub value: &'a str,
}
