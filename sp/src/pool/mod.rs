//! Bounded-concurrency task pool
//!
//! Runs work items with a sliding window of at most N in flight, runs
//! priority tasks one at a time with optional timeouts, and processes lists
//! in fixed-size batches.

mod config;
mod core;
mod error;
mod processor;
mod simulate;
mod stats;
mod task;

pub use config::PoolConfig;
pub use core::TaskPool;
pub use error::TaskError;
pub use processor::{NoopProcessor, Processor};
pub use simulate::{SimulatedProcessor, SimulationConfig};
pub use stats::PoolStats;
pub use task::PriorityTask;
