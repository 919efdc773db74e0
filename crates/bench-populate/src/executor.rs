//! The database boundary: statement text in, success or error out.

use crate::error::ExecutorError;
use async_trait::async_trait;

/// Executes parameterless SQL statements.
///
/// Implementations must be shareable across table pipelines; connection
/// reuse is the implementation's concern.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Execute one statement, returning the number of affected rows.
    async fn execute(&self, sql: &str) -> Result<u64, ExecutorError>;
}

