//! `--load`: create the schema and fill it with generated rows.

use crate::config::RunConfig;
use crate::logging::mask_connection_password;
use anyhow::Context;
use bench_populate::{create_schema, BatchLoader, LoadMetrics, PgPool};
use std::sync::Arc;
use tracing::info;

/// One connection per table pipeline plus one for DDL.
pub fn load_pool_size(config: &RunConfig) -> usize {
    config.catalog.tables().len() + 1
}

pub async fn populate(config: &RunConfig) -> anyhow::Result<LoadMetrics> {
    info!(
        "Loading {} rows into {}",
        config.catalog.total_rows(),
        mask_connection_password(&config.url)
    );
    let pool = PgPool::connect(&config.url, load_pool_size(config))
        .await
        .context("Failed to connect for loading")?;
    let pool = Arc::new(pool);

    create_schema(pool.as_ref(), &config.catalog).await?;
    info!("Creating tables complete");

    let metrics = BatchLoader::new(pool)
        .load_all(&config.catalog, config.seed, config.batch_size)
        .await?;
    for table in &metrics.tables {
        info!(
            "Inserting into table {} complete: {} rows in {} batches ({:.0} rows/sec)",
            table.table,
            table.rows_inserted,
            table.batch_count,
            table.rows_per_second()
        );
    }
    Ok(metrics)
}
