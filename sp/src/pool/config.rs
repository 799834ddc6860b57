//! Pool configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Max items in flight for `run`
    #[serde(rename = "max-concurrency", default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Chunk size used when the caller does not pass one
    #[serde(rename = "batch-size", default = "default_batch_size")]
    pub batch_size: usize,

    /// Timeout for priority tasks that do not set their own
    #[serde(rename = "task-timeout-ms", default)]
    pub task_timeout_ms: Option<u64>,
}

fn default_max_concurrency() -> usize {
    8
}

fn default_batch_size() -> usize {
    5
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            batch_size: default_batch_size(),
            task_timeout_ms: None,
        }
    }
}

impl PoolConfig {
    /// Get the default task timeout as a Duration
    pub fn task_timeout(&self) -> Option<Duration> {
        self.task_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PoolConfig::default();
        assert_eq!(config.max_concurrency, 8);
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.task_timeout(), None);
    }

    #[test]
    fn test_task_timeout_duration() {
        let config = PoolConfig {
            task_timeout_ms: Some(1500),
            ..Default::default()
        };
        assert_eq!(config.task_timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_yaml_defaults() {
        let config: PoolConfig = serde_yaml::from_str("max-concurrency: 3").unwrap();
        assert_eq!(config.max_concurrency, 3);
        assert_eq!(config.batch_size, 5);
    }
}
