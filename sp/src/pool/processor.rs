//! Processor trait definition

use async_trait::async_trait;

/// The processing step the pool runs for each work item
///
/// The pool measures how long `process` takes and hands the item to the
/// validation policy afterwards. An `Err` marks the item's outcome as failed;
/// it never aborts the rest of the run.
#[async_trait]
pub trait Processor<I>: Send + Sync {
    async fn process(&self, item: &I) -> eyre::Result<()>;
}

/// Processor that does nothing and always succeeds
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProcessor;

#[async_trait]
impl<I: Sync> Processor<I> for NoopProcessor {
    async fn process(&self, _item: &I) -> eyre::Result<()> {
        Ok(())
    }
}
