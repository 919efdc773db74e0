//! Run configuration, built once from the command line.

pub mod cli;
pub mod duration;

pub use cli::{Cli, Dbms, WorkloadKind};
pub use duration::{parse_duration_to_secs, parse_run_duration};

use anyhow::Context;
use bench_catalog::{RowTargets, SchemaCatalog, SchemaVariant};
use bench_harness::HarnessConfig;
use std::path::PathBuf;

/// Database used for administrative statements on PostgreSQL.
pub const POSTGRES_ADMIN_DATABASE: &str = "template1";

/// Everything one invocation needs, validated.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub dbms: Dbms,
    /// Name of the benchmark database.
    pub database: String,
    /// URL of the benchmark database.
    pub url: String,
    /// URL used to drop and create the benchmark database.
    pub admin_url: String,
    pub drop: bool,
    pub load: bool,
    pub dump_file: Option<PathBuf>,
    pub load_file: Option<PathBuf>,
    pub catalog: SchemaCatalog,
    pub targets: RowTargets,
    pub seed: i64,
    pub batch_size: usize,
    pub workload: WorkloadKind,
    pub harness: HarnessConfig,
}

impl RunConfig {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        if cli.dbms == Dbms::Postgres && cli.variant != SchemaVariant::Normal {
            anyhow::bail!("--dbms=postgres only works with --variant=normal");
        }
        if cli.populate.batch_size == 0 {
            anyhow::bail!("--batch-size must be at least 1");
        }

        let targets = cli.populate.row_targets();
        let catalog = SchemaCatalog::new(cli.variant, targets).context("Invalid row counts")?;
        let database = database_name(cli.variant);
        let url = cli
            .url
            .clone()
            .unwrap_or_else(|| cli.dbms.default_url(&database));
        let admin_url = match cli.dbms {
            Dbms::Postgres => with_database(&url, POSTGRES_ADMIN_DATABASE),
            Dbms::Cockroach => url.clone(),
        };

        let duration = parse_run_duration(&cli.duration)
            .with_context(|| format!("Invalid --duration: {}", cli.duration))?;
        let mut harness = HarnessConfig::default()
            .with_duration(duration)
            .with_max_ops(cli.max_ops);
        if let Some(concurrency) = cli.concurrency {
            harness = harness.with_concurrency(concurrency);
        }
        harness.validate().context("Invalid harness settings")?;

        Ok(Self {
            dbms: cli.dbms,
            database,
            url,
            admin_url,
            drop: cli.drop,
            load: cli.load,
            dump_file: cli.dump_file,
            load_file: cli.load_file,
            catalog,
            targets,
            seed: cli.populate.seed,
            batch_size: cli.populate.batch_size,
            workload: cli.workload,
            harness,
        })
    }

    pub fn variant(&self) -> SchemaVariant {
        self.catalog.variant()
    }

    /// Whether the database is (re)created before the run.
    pub fn creates_database(&self) -> bool {
        self.drop || self.load || self.load_file.is_some()
    }
}

/// Name of the benchmark database for a schema variant.
pub fn database_name(variant: SchemaVariant) -> String {
    format!("storebench_{variant}")
}

/// Replace the database path of a `postgres://` URL.
pub fn with_database(url: &str, database: &str) -> String {
    let authority_start = url.find("://").map(|p| p + 3).unwrap_or(0);
    let rest = &url[authority_start..];
    let query_start = rest.find('?').unwrap_or(rest.len());
    let path_start = rest[..query_start].find('/').unwrap_or(query_start);
    format!(
        "{}{}/{}{}",
        &url[..authority_start],
        &rest[..path_start],
        database,
        &rest[query_start..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::time::Duration;

    fn parse(args: &[&str]) -> anyhow::Result<RunConfig> {
        let mut argv = vec!["storebench"];
        argv.extend_from_slice(args);
        RunConfig::from_cli(Cli::try_parse_from(argv)?)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.dbms, Dbms::Cockroach);
        assert_eq!(config.variant(), SchemaVariant::Normal);
        assert_eq!(config.database, "storebench_normal");
        assert_eq!(
            config.url,
            "postgres://root@localhost:26257/storebench_normal?sslmode=disable"
        );
        assert_eq!(config.admin_url, config.url);
        assert_eq!(config.seed, 42);
        assert_eq!(config.batch_size, 500);
        assert_eq!(config.workload, WorkloadKind::Lookup);
        assert!(config.harness.duration.is_none());
        assert!(!config.creates_database());
    }

    #[test]
    fn test_postgres_admin_url() {
        let config = parse(&["--dbms", "postgres", "--drop"]).unwrap();
        assert_eq!(
            config.url,
            "postgres://postgres@localhost:5432/storebench_normal?sslmode=disable"
        );
        assert_eq!(
            config.admin_url,
            "postgres://postgres@localhost:5432/template1?sslmode=disable"
        );
        assert!(config.creates_database());
    }

    #[test]
    fn test_postgres_rejects_interleaved() {
        let err = parse(&["--dbms", "postgres", "--variant", "interleaved"]).unwrap_err();
        assert!(err.to_string().contains("only works with --variant=normal"));
    }

    #[test]
    fn test_interleaved_cockroach() {
        let config = parse(&["--variant", "interleaved", "--load"]).unwrap();
        assert_eq!(config.database, "storebench_interleaved");
        assert_eq!(config.catalog.variant(), SchemaVariant::Interleaved);
    }

    #[test]
    fn test_unknown_variant_rejected() {
        assert!(parse(&["--variant", "sharded"]).is_err());
    }

    #[test]
    fn test_run_limits() {
        let config = parse(&["--duration", "5m", "--max-ops", "1000", "--concurrency", "3"]).unwrap();
        assert_eq!(config.harness.duration, Some(Duration::from_secs(300)));
        assert_eq!(config.harness.max_ops, Some(1000));
        assert_eq!(config.harness.concurrency, 3);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(parse(&["--duration", "soon"]).is_err());
        assert!(parse(&["--concurrency", "0"]).is_err());
        assert!(parse(&["--batch-size", "0"]).is_err());
        assert!(parse(&["--merchants", "0"]).is_err());
        assert!(parse(&["--load", "--load-file", "dump.sql"]).is_err());
    }

    #[test]
    fn test_with_database() {
        assert_eq!(
            with_database("postgres://u:p@h:5432/bench?sslmode=disable", "template1"),
            "postgres://u:p@h:5432/template1?sslmode=disable"
        );
        assert_eq!(
            with_database("postgres://u@h:5432", "template1"),
            "postgres://u@h:5432/template1"
        );
        assert_eq!(
            with_database("postgres://u@h?sslmode=disable", "db"),
            "postgres://u@h/db?sslmode=disable"
        );
    }
}
