//! signalpool - bounded-concurrency scheduler for trading signals
//!
//! signalpool runs independent work items through a pool that keeps at most
//! N of them in flight, validates each processed item, and hands back one
//! outcome per item in the caller's original order.
//!
//! # Core Concepts
//!
//! - **Sliding Window**: a finished item immediately frees its slot for the next
//! - **No Dropped Items**: a failing item becomes a degraded outcome, never a gap
//! - **Input Order Out**: outcomes are reordered by id before returning
//! - **Pluggable Steps**: the processing step and validation policy are injected
//!
//! # Modules
//!
//! - [`pool`] - Task pool, priority tasks, batching and statistics
//! - [`validation`] - Validation policies and the default signal scoring
//! - [`domain`] - Work items, signals and outcomes
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod pool;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use domain::{Direction, Indicators, Outcome, RiskLevel, Signal, TradeSignal, WorkItem, load_signals};
pub use pool::{
    NoopProcessor, PoolConfig, PoolStats, PriorityTask, Processor, SimulatedProcessor, SimulationConfig, TaskError,
    TaskPool,
};
pub use validation::{AcceptAll, ScoringPolicy, ValidationConfig, ValidationPolicy};
