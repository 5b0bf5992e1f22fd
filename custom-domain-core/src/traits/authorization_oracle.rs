//! Authorization oracle abstraction trait

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::types::{CurrentUser, Site};

/// Rejection message when the caller is not the site owner.
pub const NOT_OWNER_MESSAGE: &str = "Not allowed. Current user does not own resource";
/// Rejection message when ownership cannot be established from the platform's answers.
pub const UNKNOWN_AUTHOR_MESSAGE: &str = "Unable to determine site author";

/// Authorization oracle Trait
///
/// The hosting platform's API decides who owns what. Implementations fetch records with the
/// caller's own credential; they never hold credentials of their own.
///
/// Platform implementation:
/// - `HttpAuthorizationOracle` (reqwest, `GET /v1/compositions/{id}` and `GET /v1/me`)
///
/// # Errors
///
/// - `TransportError`: the platform could not be reached
/// - `AuthorizationError`: the platform refused the credential
/// - `DataError`: a response did not have the expected shape
#[async_trait]
pub trait AuthorizationOracle: Send + Sync {
    /// Fetch the site record for `site_id`.
    async fn fetch_site(&self, site_id: &str, credential: &str) -> CoreResult<Site>;

    /// Fetch the identity behind `credential`.
    async fn fetch_current_user(&self, credential: &str) -> CoreResult<CurrentUser>;

    /// Return the site if the caller owns it.
    ///
    /// Site first, then identity; both must succeed before ownership is compared.
    async fn authorize(&self, site_id: &str, credential: &str) -> CoreResult<Site> {
        let site = self.fetch_site(site_id, credential).await?;
        let user = self.fetch_current_user(credential).await?;

        let Some(owner) = site.user.as_ref() else {
            return Err(CoreError::DataError(UNKNOWN_AUTHOR_MESSAGE.to_string()));
        };

        if owner.id == user.id {
            Ok(site)
        } else {
            Err(CoreError::AuthorizationError(NOT_OWNER_MESSAGE.to_string()))
        }
    }
}
