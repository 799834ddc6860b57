//! Pool statistics

use serde::Serialize;

/// Running counters kept by the pool
#[derive(Debug, Default, Clone)]
pub(crate) struct StatsCounters {
    pub max_concurrency: usize,
    pub active: usize,
    pub queued: usize,
    pub peak_active: usize,
    pub completed: u64,
    pub failed: u64,
    pub total_processing_ms: u64,
}

impl StatsCounters {
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency,
            ..Default::default()
        }
    }

    pub fn start(&mut self) {
        self.queued = self.queued.saturating_sub(1);
        self.active += 1;
        self.peak_active = self.peak_active.max(self.active);
    }

    pub fn finish(&mut self, duration_ms: u64, ok: bool) {
        self.active = self.active.saturating_sub(1);
        self.total_processing_ms += duration_ms;
        if ok {
            self.completed += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn snapshot(&self) -> PoolStats {
        let finished = self.completed + self.failed;
        let avg_processing_time_ms = if finished > 0 {
            self.total_processing_ms as f64 / finished as f64
        } else {
            0.0
        };
        let efficiency_percent = if finished > 0 {
            self.completed as f64 * 100.0 / finished as f64
        } else {
            100.0
        };

        PoolStats {
            max_concurrency: self.max_concurrency,
            active_threads: self.active,
            queued_tasks: self.queued,
            peak_active: self.peak_active,
            completed_tasks: self.completed,
            failed_tasks: self.failed,
            avg_processing_time_ms,
            efficiency_percent,
        }
    }
}

/// Diagnostic snapshot of the pool
///
/// Advisory only; nothing in the pool schedules off these numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolStats {
    pub max_concurrency: usize,
    pub active_threads: usize,
    pub queued_tasks: usize,
    pub peak_active: usize,
    pub completed_tasks: u64,
    pub failed_tasks: u64,
    pub avg_processing_time_ms: f64,
    pub efficiency_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let stats = StatsCounters::new(4).snapshot();
        assert_eq!(stats.max_concurrency, 4);
        assert_eq!(stats.completed_tasks, 0);
        assert_eq!(stats.avg_processing_time_ms, 0.0);
        assert_eq!(stats.efficiency_percent, 100.0);
    }

    #[test]
    fn test_start_finish_tracking() {
        let mut counters = StatsCounters::new(2);
        counters.queued = 3;

        counters.start();
        counters.start();
        assert_eq!(counters.active, 2);
        assert_eq!(counters.queued, 1);

        counters.finish(10, true);
        counters.finish(30, false);
        counters.start();
        counters.finish(20, true);

        let stats = counters.snapshot();
        assert_eq!(stats.active_threads, 0);
        assert_eq!(stats.queued_tasks, 0);
        assert_eq!(stats.peak_active, 2);
        assert_eq!(stats.completed_tasks, 2);
        assert_eq!(stats.failed_tasks, 1);
        assert_eq!(stats.avg_processing_time_ms, 20.0);
        assert!((stats.efficiency_percent - 66.666).abs() < 0.01);
    }
}
