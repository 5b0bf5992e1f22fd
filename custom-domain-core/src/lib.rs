//! Custom Domain Core Library
//!
//! Provisioning workflows for custom domains of hosted sites:
//! - Full zone provisioning with compensating rollback (`ZoneService`)
//! - Full zone teardown (`ZoneService`)
//! - Routing key pair management (`KeyPairService`)
//!
//! The library is platform independent. The hosting platform API and the routing store are
//! reached through traits; the zone provider through `custom_domain_provider::ZoneProvider`.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{KeyPairService, ServiceContext, ZoneService};
pub use traits::{AuthorizationOracle, KeyValueStore};
