//! Concurrent benchmark harness.
//!
//! A [`Harness`] runs a [`Workload`] on a fixed number of workers, reports
//! throughput and latency percentiles every tick, and prints a summary when
//! the run ends.
//!
//! ```ignore
//! let config = HarnessConfig::default()
//!     .with_concurrency(8)
//!     .with_duration(Some(Duration::from_secs(30)));
//! let mut harness = Harness::new(config)?;
//! let shutdown = async {
//!     let _ = tokio::signal::ctrl_c().await;
//! };
//! let summary = harness
//!     .run(Arc::new(NoopWorkload), shutdown, std::io::stdout())
//!     .await?;
//! ```

pub mod aggregator;
pub mod config;
pub mod error;
pub mod harness;
pub mod histogram;
pub mod metrics;
pub mod report;
pub mod workload;

pub use aggregator::{LatencyAggregator, Summary, TickReport};
pub use config::{default_concurrency, HarnessConfig};
pub use error::{HarnessError, WorkloadError};
pub use harness::{Harness, HarnessState};
pub use histogram::WorkerLatency;
pub use metrics::OpCounter;
pub use report::Reporter;
pub use workload::{FailingWorkload, NoopWorkload, Workload};
