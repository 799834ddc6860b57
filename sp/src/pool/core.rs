//! Pool implementation

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::time::{Duration, Instant};

use futures::future::join_all;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{Outcome, WorkItem};
use crate::validation::ValidationPolicy;

use super::config::PoolConfig;
use super::error::TaskError;
use super::processor::Processor;
use super::stats::{PoolStats, StatsCounters};
use super::task::PriorityTask;

/// The TaskPool runs work items with bounded concurrency, runs priority
/// tasks one at a time, and processes lists in fixed-size batches.
///
/// Work is polled from the calling task; nothing is spawned. The counters
/// behind [`TaskPool::pool_stats`] are shared across calls and advisory.
pub struct TaskPool<P, V> {
    config: PoolConfig,
    processor: P,
    policy: V,
    stats: Mutex<StatsCounters>,
}

impl<P, V> TaskPool<P, V> {
    /// Create a new pool with the given processing step and validation policy
    pub fn new(config: PoolConfig, processor: P, policy: V) -> Self {
        debug!(?config, "TaskPool::new: called");
        let stats = StatsCounters::new(config.max_concurrency.max(1));
        Self {
            config,
            processor,
            policy,
            stats: Mutex::new(stats),
        }
    }

    /// Get the pool configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Get the processing step
    pub fn processor(&self) -> &P {
        &self.processor
    }

    /// Get the validation policy
    pub fn policy(&self) -> &V {
        &self.policy
    }

    /// Run every item with at most `max_concurrency` in flight
    ///
    /// Returns exactly one outcome per item, in input order. A `max_concurrency`
    /// of zero is treated as one.
    pub async fn execute_parallel<I>(&self, items: Vec<I>, max_concurrency: usize) -> Vec<Outcome<I>>
    where
        I: WorkItem,
        P: Processor<I>,
        V: ValidationPolicy<I>,
    {
        let total = items.len();
        let limit = max_concurrency.max(1);
        debug!(total, max_concurrency, limit, "TaskPool::execute_parallel: called");

        if total == 0 {
            debug!("TaskPool::execute_parallel: no items, returning");
            return Vec::new();
        }

        {
            let mut stats = self.stats.lock().await;
            stats.max_concurrency = limit;
            stats.queued += total;
        }

        // Each id maps to every input position holding it, so duplicate ids
        // still come back once each
        let mut positions: HashMap<String, VecDeque<usize>> = HashMap::with_capacity(total);
        for (idx, item) in items.iter().enumerate() {
            positions.entry(item.id().to_string()).or_default().push_back(idx);
        }

        let started = Instant::now();
        let mut pending = items.into_iter();
        let mut in_flight = FuturesUnordered::new();
        for item in pending.by_ref().take(limit) {
            in_flight.push(self.process_item(item));
        }

        let mut outcomes = Vec::with_capacity(total);
        while let Some(outcome) = in_flight.next().await {
            debug!(id = %outcome.id, in_flight = in_flight.len(), "TaskPool::execute_parallel: item finished");
            outcomes.push(outcome);
            if let Some(item) = pending.next() {
                in_flight.push(self.process_item(item));
            }
        }

        let mut ordered: Vec<(usize, Outcome<I>)> = outcomes
            .into_iter()
            .map(|outcome| {
                let idx = positions
                    .get_mut(&outcome.id)
                    .and_then(|queue| queue.pop_front())
                    .unwrap_or(usize::MAX);
                (idx, outcome)
            })
            .collect();
        ordered.sort_by_key(|(idx, _)| *idx);

        let outcomes: Vec<_> = ordered.into_iter().map(|(_, outcome)| outcome).collect();
        let failed = outcomes.iter().filter(|o| o.is_failed()).count();
        let valid = outcomes.iter().filter(|o| o.valid).count();
        info!(
            total,
            valid,
            failed,
            limit,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Parallel run complete"
        );
        outcomes
    }

    /// Run every item using the configured concurrency
    pub async fn run<I>(&self, items: Vec<I>) -> Vec<Outcome<I>>
    where
        I: WorkItem,
        P: Processor<I>,
        V: ValidationPolicy<I>,
    {
        self.execute_parallel(items, self.config.max_concurrency).await
    }

    /// Process one item: time it, then validate and review it
    async fn process_item<I>(&self, item: I) -> Outcome<I>
    where
        I: WorkItem,
        P: Processor<I>,
        V: ValidationPolicy<I>,
    {
        self.stats.lock().await.start();
        let start = Instant::now();

        let result = self.processor.process(&item).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let outcome = match result {
            Ok(()) => {
                let valid = self.policy.validate(&item);
                let valid = self.policy.review(&item, valid);
                debug!(id = %item.id(), duration_ms, valid, "TaskPool::process_item: processed");
                Outcome::processed(item, duration_ms, valid)
            }
            Err(e) => {
                warn!(id = %item.id(), duration_ms, error = %e, "Processing failed");
                Outcome::failed(item, duration_ms)
            }
        };

        self.stats.lock().await.finish(duration_ms, !outcome.is_failed());
        outcome
    }

    /// Run tasks one at a time, highest priority first
    ///
    /// Tasks of equal priority keep their input order. A task that fails or
    /// outlives its timeout is logged and contributes no result. A timed-out
    /// task is not cancelled: its work keeps running detached and whatever it
    /// eventually returns is discarded.
    pub async fn execute_tasks<R: Send + 'static>(&self, mut tasks: Vec<PriorityTask<R>>) -> Vec<R> {
        debug!(count = tasks.len(), "TaskPool::execute_tasks: called");

        // Stable, so equal priorities stay in submission order
        tasks.sort_by(|a, b| b.priority.cmp(&a.priority));
        self.stats.lock().await.queued += tasks.len();

        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            let id = task.id.clone();
            let priority = task.priority;
            let timeout = task.timeout.or_else(|| self.config.task_timeout());
            debug!(%id, priority, ?timeout, "TaskPool::execute_tasks: starting task");

            self.stats.lock().await.start();
            let start = Instant::now();
            let result = run_task(task, timeout).await;
            let duration_ms = start.elapsed().as_millis() as u64;
            self.stats.lock().await.finish(duration_ms, result.is_ok());

            match result {
                Ok(value) => {
                    debug!(%id, duration_ms, "TaskPool::execute_tasks: task succeeded");
                    results.push(value);
                }
                Err(e) => {
                    warn!(task_id = %id, priority, duration_ms, error = %e, "Task failed, skipping");
                }
            }
        }

        debug!(results = results.len(), "TaskPool::execute_tasks: done");
        results
    }

    /// Process items in consecutive chunks of `batch_size`
    ///
    /// Chunks run strictly one after another; every item in a chunk runs
    /// concurrently. If any item in a chunk fails, the chunk is logged with its
    /// starting index and contributes no results. A `batch_size` of zero is
    /// treated as one.
    pub async fn batch_process<T, R, F, Fut>(&self, items: Vec<T>, processor: F, batch_size: usize) -> Vec<R>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = eyre::Result<R>>,
    {
        let total = items.len();
        let batch_size = batch_size.max(1);
        debug!(total, batch_size, "TaskPool::batch_process: called");

        self.stats.lock().await.queued += total;

        let mut results = Vec::with_capacity(total);
        let mut remaining = items.into_iter();
        let mut chunk_start = 0;

        loop {
            let chunk: Vec<T> = remaining.by_ref().take(batch_size).collect();
            if chunk.is_empty() {
                break;
            }
            let chunk_len = chunk.len();
            debug!(chunk_start, chunk_len, "TaskPool::batch_process: starting chunk");

            {
                let mut stats = self.stats.lock().await;
                for _ in 0..chunk_len {
                    stats.start();
                }
            }

            let start = Instant::now();
            let settled = join_all(chunk.into_iter().map(&processor)).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            {
                let mut stats = self.stats.lock().await;
                for result in &settled {
                    stats.finish(duration_ms, result.is_ok());
                }
            }

            let failures: Vec<String> = settled
                .iter()
                .filter_map(|r| r.as_ref().err())
                .map(|e| format!("{:#}", e))
                .collect();

            if let Some(first_error) = failures.first() {
                warn!(
                    chunk_start,
                    chunk_len,
                    failed = failures.len(),
                    error = %first_error,
                    "Batch failed, dropping its results"
                );
            } else {
                results.extend(settled.into_iter().flatten());
            }

            chunk_start += chunk_len;
        }

        debug!(results = results.len(), "TaskPool::batch_process: done");
        results
    }

    /// Process items in chunks of the configured batch size
    pub async fn batch<T, R, F, Fut>(&self, items: Vec<T>, processor: F) -> Vec<R>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = eyre::Result<R>>,
    {
        self.batch_process(items, processor, self.config.batch_size).await
    }

    /// Get a diagnostic snapshot of the pool
    pub async fn pool_stats(&self) -> PoolStats {
        debug!("TaskPool::pool_stats: called");
        self.stats.lock().await.snapshot()
    }
}

/// Run one task, racing it against its timeout when it has one
///
/// The work is spawned so that losing the race only stops the wait; the
/// detached work runs to completion on its own.
async fn run_task<R: Send + 'static>(task: PriorityTask<R>, timeout: Option<Duration>) -> Result<R, TaskError> {
    let id = task.id.clone();
    let mut handle = tokio::spawn(task.start());
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, &mut handle).await {
            Ok(joined) => Ok(joined??),
            Err(_) => {
                debug!(%id, ?limit, "run_task: timed out, leaving work detached");
                Err(TaskError::Timeout(limit))
            }
        },
        None => Ok(handle.await??),
    }
}
