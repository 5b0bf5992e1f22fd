//! Collaborator abstractions
//!
//! The orchestrator only talks to the outside world through these traits and
//! [`ZoneProvider`](custom_domain_provider::ZoneProvider).

mod authorization_oracle;
mod key_value_store;

pub use authorization_oracle::{AuthorizationOracle, NOT_OWNER_MESSAGE, UNKNOWN_AUTHOR_MESSAGE};
pub use key_value_store::KeyValueStore;
