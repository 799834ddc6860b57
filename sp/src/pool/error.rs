//! Pool error types

use std::time::Duration;
use thiserror::Error;

/// Why a priority task produced no result
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Work failed: {0:#}")]
    Failed(eyre::Report),

    #[error("Work panicked: {0}")]
    Panicked(#[from] tokio::task::JoinError),
}

impl TaskError {
    /// Check if this is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, TaskError::Timeout(_))
    }
}

impl From<eyre::Report> for TaskError {
    fn from(err: eyre::Report) -> Self {
        TaskError::Failed(err)
    }
}
