//! Error types for the benchmark harness.

use thiserror::Error;

/// Failure of a single workload operation.
#[derive(Error, Debug)]
pub enum WorkloadError {
    /// The operation reported a failure.
    #[error("{0}")]
    Failed(String),

    /// Error raised by the database client.
    #[error(transparent)]
    Source(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl WorkloadError {
    /// Wrap any client error.
    pub fn source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        WorkloadError::Source(Box::new(err))
    }
}

/// Errors that end a benchmark run.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Invalid harness configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A worker's operation failed; the run is aborted.
    #[error("worker {worker} failed: {source}")]
    Workload {
        worker: usize,
        #[source]
        source: WorkloadError,
    },

    /// A worker task panicked.
    #[error("worker task panicked: {0}")]
    WorkerPanicked(String),

    /// Histogram creation or merge failed.
    #[error("Histogram error: {0}")]
    Histogram(String),

    /// Writing the report failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
