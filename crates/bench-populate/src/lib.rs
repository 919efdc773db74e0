//! Batch loader for populating the storebench schema.
//!
//! Each catalog table gets its own pipeline: a [`TableWriter`] produces
//! batches in primary key order and the [`BatchLoader`] submits them one at a
//! time through a [`SqlExecutor`]. Pipelines run concurrently inside a task
//! group; the first failure cancels the rest.
//!
//! ```ignore
//! let pool = Arc::new(PgPool::connect(url, catalog.tables().len() + 1).await?);
//! create_schema(pool.as_ref(), &catalog).await?;
//! let metrics = BatchLoader::new(pool).load_all(&catalog, 42, 500).await?;
//! ```
//!
//! [`TableWriter`]: bench_generator::TableWriter

pub mod args;
pub mod error;
pub mod executor;
pub mod loader;
pub mod pool;
pub mod schema;

pub use args::PopulateArgs;
pub use error::{ExecutorError, PopulateError};
pub use executor::SqlExecutor;
pub use loader::{BatchLoader, LoadMetrics, TableLoadMetrics};
pub use pool::PgPool;
pub use schema::create_schema;
