//! Concurrent per-table batch loading.

use crate::error::PopulateError;
use crate::executor::SqlExecutor;
use bench_catalog::{insert_prefix, SchemaCatalog, TableName};
use bench_generator::TableWriter;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Metrics from loading a single table.
#[derive(Debug, Clone)]
pub struct TableLoadMetrics {
    /// Table that was loaded.
    pub table: TableName,
    /// Number of rows inserted.
    pub rows_inserted: u64,
    /// Number of batches executed.
    pub batch_count: u64,
    /// Time from first batch to last.
    pub duration: Duration,
}

impl TableLoadMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Metrics from loading every table of a catalog.
#[derive(Debug, Clone, Default)]
pub struct LoadMetrics {
    /// Per-table metrics in catalog order.
    pub tables: Vec<TableLoadMetrics>,
    /// Wall time until the last pipeline finished.
    pub total_duration: Duration,
}

impl LoadMetrics {
    /// Rows inserted across all tables.
    pub fn rows_inserted(&self) -> u64 {
        self.tables.iter().map(|t| t.rows_inserted).sum()
    }

    /// Calculate overall rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted() as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Applies generated batches to the database, one pipeline per table.
pub struct BatchLoader<E> {
    executor: Arc<E>,
}

impl<E> Clone for BatchLoader<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<E: SqlExecutor + 'static> BatchLoader<E> {
    /// Create a loader that submits statements through `executor`.
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    /// Load one table, batch by batch, in primary key order.
    ///
    /// The token is checked before each batch: a batch already submitted
    /// completes, no further batch starts. Failed batches are not retried.
    pub async fn load_table(
        &self,
        mut writer: TableWriter,
        cancel: &CancellationToken,
    ) -> Result<TableLoadMetrics, PopulateError> {
        let table = writer.name();
        let start_time = Instant::now();
        let prefix = insert_prefix(writer.table());
        let mut statement = String::new();
        let mut metrics = TableLoadMetrics {
            table,
            rows_inserted: 0,
            batch_count: 0,
            duration: Duration::ZERO,
        };

        info!(
            "Inserting {} rows into table <{}> (batch size: {})",
            writer.remaining(),
            table,
            writer.batch_size()
        );

        loop {
            if cancel.is_cancelled() {
                debug!("Loading table <{}> cancelled", table);
                return Err(PopulateError::Cancelled(table));
            }

            let (rows, first_key) = match writer.next_batch() {
                Some(batch) => {
                    statement.clear();
                    statement.push_str(&prefix);
                    statement.push(' ');
                    statement.push_str(batch.values);
                    statement.push(';');
                    (batch.rows, batch.first_key)
                }
                None => break,
            };

            self.executor
                .execute(&statement)
                .await
                .map_err(|source| PopulateError::Batch {
                    table,
                    first_key,
                    source,
                })?;

            metrics.rows_inserted += rows;
            metrics.batch_count += 1;

            debug!(
                "Batch {} of <{}> complete: {} rows inserted, {} remaining",
                metrics.batch_count,
                table,
                rows,
                writer.remaining()
            );
        }

        metrics.duration = start_time.elapsed();
        info!(
            "Inserting into table <{}> complete: {} rows in {:?} ({:.2} rows/sec)",
            table,
            metrics.rows_inserted,
            metrics.duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }

    /// Load every table of the catalog concurrently.
    ///
    /// All writers are built before any pipeline starts. The first failing
    /// pipeline cancels its siblings and its error is returned once every
    /// pipeline has stopped.
    pub async fn load_all(
        &self,
        catalog: &SchemaCatalog,
        seed: i64,
        batch_size: usize,
    ) -> Result<LoadMetrics, PopulateError> {
        let start_time = Instant::now();
        let writers = catalog
            .tables()
            .iter()
            .map(|table| TableWriter::new(table.clone(), seed, batch_size))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Inserting into {} tables ({} rows), this may take a while...",
            writers.len(),
            catalog.total_rows()
        );

        let cancel = CancellationToken::new();
        let mut pipelines = JoinSet::new();
        for writer in writers {
            let loader = self.clone();
            let cancel = cancel.clone();
            pipelines.spawn(async move { loader.load_table(writer, &cancel).await });
        }

        let mut metrics = LoadMetrics::default();
        let mut first_error: Option<PopulateError> = None;

        while let Some(joined) = pipelines.join_next().await {
            let result = joined.map_err(|e| PopulateError::Aborted(e.to_string()));
            match result.and_then(|r| r) {
                Ok(table_metrics) => metrics.tables.push(table_metrics),
                Err(PopulateError::Cancelled(_)) => {}
                Err(e) => {
                    if first_error.is_none() {
                        error!("{}; cancelling remaining tables", e);
                        cancel.cancel();
                        first_error = Some(e);
                    }
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        let order: Vec<TableName> = catalog.tables().iter().map(|t| t.name).collect();
        metrics
            .tables
            .sort_by_key(|t| order.iter().position(|name| *name == t.table));
        metrics.total_duration = start_time.elapsed();

        info!(
            "Data insertion done: {} rows in {:?} ({:.2} rows/sec)",
            metrics.rows_inserted(),
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_metrics_rows_per_second() {
        let metrics = TableLoadMetrics {
            table: TableName::Merchant,
            rows_inserted: 1000,
            batch_count: 2,
            duration: Duration::from_secs(10),
        };

        assert_eq!(metrics.rows_per_second(), 100.0);
    }

    #[test]
    fn test_load_metrics_zero_duration() {
        let metrics = LoadMetrics {
            tables: vec![TableLoadMetrics {
                table: TableName::Store,
                rows_inserted: 10,
                batch_count: 1,
                duration: Duration::ZERO,
            }],
            total_duration: Duration::ZERO,
        };

        assert_eq!(metrics.rows_inserted(), 10);
        assert_eq!(metrics.rows_per_second(), 0.0);
    }
}
