//! Utility modules.

/// Log sanitization utilities to keep secrets and large bodies out of logs.
pub mod log_sanitizer;
