//! Priority task type

use std::future::Future;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;

type Work<R> = Box<dyn FnOnce() -> BoxFuture<'static, eyre::Result<R>> + Send>;

/// A unit of sequential work with a priority and optional timeout
///
/// Higher priority runs first. The work closure is only invoked when the
/// task's turn comes, and its future is spawned so a timeout can stop
/// waiting on it without cancelling it.
pub struct PriorityTask<R> {
    pub id: String,
    pub priority: i64,
    pub timeout: Option<Duration>,
    work: Work<R>,
}

impl<R: Send + 'static> PriorityTask<R> {
    /// Create a new task without a timeout
    pub fn new<F, Fut>(id: impl Into<String>, priority: i64, work: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = eyre::Result<R>> + Send + 'static,
    {
        Self {
            id: id.into(),
            priority,
            timeout: None,
            work: Box::new(move || work().boxed()),
        }
    }

    /// Set a timeout for this task
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Consume the task, starting its work
    pub(crate) fn start(self) -> BoxFuture<'static, eyre::Result<R>> {
        (self.work)()
    }
}

impl<R> std::fmt::Debug for PriorityTask<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityTask")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
