//! Error types for schema creation and data loading.

use bench_catalog::TableName;
use bench_generator::GeneratorError;
use thiserror::Error;

/// Errors returned by a [`SqlExecutor`](crate::SqlExecutor).
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// No connection could be checked out of the pool.
    #[error("Connection pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// The pool could not be built.
    #[error("Connection pool build error: {0}")]
    Build(String),

    /// Any other statement failure.
    #[error("{0}")]
    Statement(String),
}

/// Errors that can occur while populating the database.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// A table writer could not be constructed.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// CREATE TABLE failed.
    #[error("loading schema failed for table '{table}': {source}")]
    Schema {
        table: TableName,
        #[source]
        source: ExecutorError,
    },

    /// A batch INSERT failed; the table is left partially loaded.
    #[error("inserting into table '{table}' failed at key {first_key}: {source}")]
    Batch {
        table: TableName,
        first_key: u64,
        #[source]
        source: ExecutorError,
    },

    /// The pipeline stopped because a sibling pipeline failed.
    #[error("loading table '{0}' was cancelled")]
    Cancelled(TableName),

    /// The pipeline task panicked.
    #[error("loading table pipeline aborted: {0}")]
    Aborted(String),
}
