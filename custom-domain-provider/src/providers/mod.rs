//! Zone provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod cloudflare;

pub use cloudflare::CloudflareProvider;
