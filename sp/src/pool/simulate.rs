//! Simulated processing step
//!
//! Stands in for real work with a random delay and an optional random
//! failure, so the pool can be exercised end to end without a backend.

use std::time::Duration;

use async_trait::async_trait;
use eyre::eyre;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::WorkItem;

use super::processor::Processor;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Shortest simulated processing time
    #[serde(rename = "min-delay-ms")]
    pub min_delay_ms: u64,

    /// Longest simulated processing time
    #[serde(rename = "max-delay-ms")]
    pub max_delay_ms: u64,

    /// Probability in [0, 1] that an item fails; NaN or infinite means never
    #[serde(rename = "failure-rate")]
    pub failure_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 50,
            max_delay_ms: 250,
            failure_rate: 0.0,
        }
    }
}

/// Processor that sleeps for a random delay and sometimes fails
#[derive(Debug, Clone, Default)]
pub struct SimulatedProcessor {
    config: SimulationConfig,
}

impl SimulatedProcessor {
    pub fn new(config: SimulationConfig) -> Self {
        debug!(?config, "SimulatedProcessor::new: called");
        Self { config }
    }

    /// Pick a delay and whether this run fails
    fn roll(&self) -> (Duration, bool) {
        let (lo, hi) = if self.config.min_delay_ms <= self.config.max_delay_ms {
            (self.config.min_delay_ms, self.config.max_delay_ms)
        } else {
            (self.config.max_delay_ms, self.config.min_delay_ms)
        };
        let failure_rate = if self.config.failure_rate.is_finite() {
            self.config.failure_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let mut rng = rand::rng();
        let delay = Duration::from_millis(rng.random_range(lo..=hi));
        let fail = rng.random_bool(failure_rate);
        (delay, fail)
    }
}

#[async_trait]
impl<I: WorkItem> Processor<I> for SimulatedProcessor {
    async fn process(&self, item: &I) -> eyre::Result<()> {
        let (delay, fail) = self.roll();
        debug!(id = %item.id(), ?delay, fail, "SimulatedProcessor::process: called");
        tokio::time::sleep(delay).await;

        if fail {
            return Err(eyre!("Simulated failure for {}", item.id()));
        }
        Ok(())
    }
}
