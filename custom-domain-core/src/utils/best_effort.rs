//! Optional workflow steps
//!
//! A best-effort step is attempted once; its failure is logged and dropped. Mandatory steps
//! use `?` and never go through here.

use std::fmt::Display;
use std::future::Future;

/// Await `step`, returning its value or `None` after logging the failure at `warn`.
pub async fn best_effort<T, E, F>(label: &str, step: F) -> Option<T>
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    match step.await {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Optional step '{label}' failed, continuing: {e}");
            None
        }
    }
}
