//! PostgreSQL connection pool.

use crate::error::ExecutorError;
use crate::executor::SqlExecutor;
use async_trait::async_trait;
use deadpool_postgres::{Client, Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::{NoTls, SimpleQueryMessage};
use tracing::debug;

/// A bounded pool of PostgreSQL connections.
///
/// Callers check a connection out per statement and return it on drop, so no
/// connection is tied to a caller. Statements prepared through
/// [`Client::prepare_cached`] are cached per connection.
#[derive(Clone)]
pub struct PgPool {
    pool: Pool,
}

impl PgPool {
    /// Open a pool of up to `size` connections to the given database.
    ///
    /// # Arguments
    ///
    /// * `connection_string` - e.g. `postgres://root@localhost:26257/db?sslmode=disable`
    /// * `size` - maximum number of connections; at least one
    pub async fn connect(connection_string: &str, size: usize) -> Result<Self, ExecutorError> {
        let size = size.max(1);
        let pg_config: tokio_postgres::Config = connection_string.parse()?;
        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );
        let pool = Pool::builder(manager)
            .max_size(size)
            .build()
            .map_err(|e| ExecutorError::Build(e.to_string()))?;

        // Test connection
        pool.get().await?.simple_query("SELECT 1").await?;
        debug!("Opened PostgreSQL pool (max size: {})", size);

        Ok(Self { pool })
    }

    /// Maximum number of connections.
    pub fn size(&self) -> usize {
        self.pool.status().max_size
    }

    /// Check out a connection; it returns to the pool when dropped.
    pub async fn get(&self) -> Result<Client, ExecutorError> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl SqlExecutor for PgPool {
    async fn execute(&self, sql: &str) -> Result<u64, ExecutorError> {
        let client = self.get().await?;
        let messages = client.simple_query(sql).await?;
        Ok(messages
            .iter()
            .map(|m| match m {
                SimpleQueryMessage::CommandComplete(rows) => *rows,
                _ => 0,
            })
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_bad_url() {
        let err = PgPool::connect("not a url at all ===", 2).await.err().unwrap();
        assert!(matches!(err, ExecutorError::PostgreSQL(_)));
    }

    #[tokio::test]
    async fn test_connect_refused() {
        let err = PgPool::connect("postgres://root@127.0.0.1:1/db?connect_timeout=1", 2)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ExecutorError::Pool(_)));
    }
}
