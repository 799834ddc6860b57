//! Outcome validation
//!
//! Pluggable policies deciding whether a processed work item is valid.

mod config;
mod policy;

pub use config::ValidationConfig;
pub use policy::{AcceptAll, ScoringPolicy, ValidationPolicy};
