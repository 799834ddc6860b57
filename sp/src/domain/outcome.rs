//! Per-item outcome produced by the pool

use serde::{Deserialize, Serialize};

use super::WorkItem;

/// Failure marker recorded when an item's processing step returns an error
pub const PROCESSING_FAILED: &str = "Processing failed";

/// Result of running one work item through the pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome<I> {
    /// Copied from the work item for correlation and reordering
    pub id: String,

    /// Wall-clock time spent on this item
    pub processing_duration_ms: u64,

    /// Final validity after both validation stages
    pub valid: bool,

    /// Set when processing failed; `valid` is then always false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,

    /// The work item itself, passed through for the caller
    pub item: I,
}

impl<I: WorkItem> Outcome<I> {
    /// Outcome for an item whose processing step succeeded
    pub fn processed(item: I, processing_duration_ms: u64, valid: bool) -> Self {
        Self {
            id: item.id().to_string(),
            processing_duration_ms,
            valid,
            failure: None,
            item,
        }
    }

    /// Degraded outcome for an item whose processing step failed
    pub fn failed(item: I, processing_duration_ms: u64) -> Self {
        Self {
            id: item.id().to_string(),
            processing_duration_ms,
            valid: false,
            failure: Some(PROCESSING_FAILED.to_string()),
            item,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}
