//! HTTP front end for the custom domain provisioner.
//!
//! Routes map one-to-one onto the provisioning workflows in `custom-domain-core`; the
//! binary in `main.rs` wires them to the adapters configured by `custom-domain-app`.

pub mod error;
pub mod routes;
pub mod telemetry;

pub use error::ApiError;
pub use routes::{REQUEST_ID_HEADER, configure, request_span};
