//! The unit of work driven by the harness.

use crate::error::WorkloadError;
use async_trait::async_trait;

/// One benchmark operation, executed repeatedly by every worker.
///
/// A single instance is shared by all workers; `worker` identifies the
/// caller so implementations can keep per-worker state.
#[async_trait]
pub trait Workload: Send + Sync {
    async fn execute(&self, worker: usize) -> Result<(), WorkloadError>;
}

/// Does nothing; measures harness overhead.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopWorkload;

#[async_trait]
impl Workload for NoopWorkload {
    async fn execute(&self, _worker: usize) -> Result<(), WorkloadError> {
        Ok(())
    }
}

/// Fails every operation with the given message.
#[derive(Debug, Clone)]
pub struct FailingWorkload {
    message: String,
}

impl FailingWorkload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Workload for FailingWorkload {
    async fn execute(&self, _worker: usize) -> Result<(), WorkloadError> {
        Err(WorkloadError::Failed(self.message.clone()))
    }
}
