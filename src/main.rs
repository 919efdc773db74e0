//! Command-line interface for storebench
//!
//! # Usage Examples
//!
//! ## Populate and benchmark
//! ```bash
//! # Recreate the database, load deterministic data, then run lookups for 5 minutes
//! storebench --drop --load --seed 42 --duration 5m
//!
//! # Smaller data set on PostgreSQL
//! storebench --dbms postgres --drop --load \
//!   --merchants 100 --products 10000 --variants 100000 --stores 500
//! ```
//!
//! ## Dump and restore
//! ```bash
//! # Load once and keep a dump of the generated data
//! storebench --drop --load --dump-file storebench.sql --max-ops 0
//!
//! # Restore the dump instead of regenerating
//! storebench --drop --load-file storebench.sql --duration 1m
//! ```
//!
//! Progress is logged to stderr (set `RUST_LOG=info`); the benchmark report
//! is written to stdout.

use anyhow::Context;
use bench_harness::{Harness, NoopWorkload, Workload};
use bench_populate::PgPool;
use clap::Parser;
use std::sync::Arc;
use storebench::config::{Cli, RunConfig, WorkloadKind};
use storebench::dump::{dump_to_file, load_from_file, ToolCommand};
use storebench::workload::{lookup_pool_size, PointLookupWorkload};
use storebench::{database, populate, shutdown};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RunConfig::from_cli(cli)?;
    info!(
        "storebench: {} schema on {} (database {})",
        config.variant(),
        config.dbms,
        config.database
    );

    prepare_data(&config).await?;
    run_benchmark(&config).await
}

/// Recreate, load and dump the database as requested.
async fn prepare_data(config: &RunConfig) -> anyhow::Result<()> {
    if config.creates_database() {
        database::recreate_database(config).await?;
    }

    if let Some(path) = &config.load_file {
        load_from_file(&ToolCommand::load(config.dbms, &config.database), path).await?;
    } else if config.load {
        populate::populate(config).await?;
    }

    if let Some(path) = &config.dump_file {
        dump_to_file(&ToolCommand::dump(config.dbms, &config.database), path).await?;
    }
    Ok(())
}

async fn run_benchmark(config: &RunConfig) -> anyhow::Result<()> {
    if config.harness.max_ops == Some(0) {
        info!("--max-ops is 0, skipping the benchmark");
        return Ok(());
    }

    let workload: Arc<dyn Workload> = match config.workload {
        WorkloadKind::Noop => Arc::new(NoopWorkload),
        WorkloadKind::Lookup => {
            let pool = PgPool::connect(&config.url, lookup_pool_size(config.harness.concurrency))
                .await
                .context("Failed to connect for the benchmark")?;
            let workload = PointLookupWorkload::prepare(
                Arc::new(pool),
                config.targets,
                config.seed,
                config.harness.concurrency,
            )
            .await
            .context("Failed to prepare lookup statements")?;
            Arc::new(workload)
        }
    };

    let mut harness = Harness::new(config.harness.clone())?;
    harness
        .run(workload, shutdown::shutdown_signal(), std::io::stdout())
        .await?;
    Ok(())
}
