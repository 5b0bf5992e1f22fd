//! Utility modules

pub mod best_effort;
