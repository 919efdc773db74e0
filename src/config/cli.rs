//! Command-line arguments.

use bench_catalog::SchemaVariant;
use bench_populate::PopulateArgs;
use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "storebench")]
#[command(
    about = "Populate a merchant/product/variant/store schema and benchmark point lookups"
)]
#[command(long_about = None)]
pub struct Cli {
    /// Number of concurrent workers (default: 2 x logical CPUs)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// How long to run, e.g. "30s", "5m", "1h" (0 = run until interrupted)
    #[arg(long, default_value = "0")]
    pub duration: String,

    /// Stop after this many operations in total
    #[arg(long)]
    pub max_ops: Option<u64>,

    /// Database URL (default depends on --dbms)
    #[arg(long, env = "STOREBENCH_URL")]
    pub url: Option<String>,

    /// Drop and recreate the database
    #[arg(long)]
    pub drop: bool,

    /// Generate fresh data from --seed (deterministic). Use with --drop
    #[arg(long)]
    pub load: bool,

    /// Dump database contents to this file
    #[arg(long, value_name = "PATH")]
    pub dump_file: Option<PathBuf>,

    /// Load a file produced by --dump-file into the database
    #[arg(long, value_name = "PATH", conflicts_with = "load")]
    pub load_file: Option<PathBuf>,

    /// Database engine, relevant for --load and --dump-file
    #[arg(long, value_enum, default_value_t = Dbms::Cockroach)]
    pub dbms: Dbms,

    /// Table layout ("normal" or "interleaved"). Use with --load/--load-file
    #[arg(long, default_value = "normal")]
    pub variant: SchemaVariant,

    /// Operation each worker performs
    #[arg(long, value_enum, default_value_t = WorkloadKind::Lookup)]
    pub workload: WorkloadKind,

    #[command(flatten)]
    pub populate: PopulateArgs,
}

/// Supported database engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Dbms {
    Cockroach,
    Postgres,
}

impl Dbms {
    /// Default URL for a database on a local insecure node.
    pub fn default_url(&self, database: &str) -> String {
        match self {
            Dbms::Cockroach => {
                format!("postgres://root@localhost:26257/{database}?sslmode=disable")
            }
            Dbms::Postgres => {
                format!("postgres://postgres@localhost:5432/{database}?sslmode=disable")
            }
        }
    }
}

impl fmt::Display for Dbms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dbms::Cockroach => write!(f, "cockroach"),
            Dbms::Postgres => write!(f, "postgres"),
        }
    }
}

/// Benchmark operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WorkloadKind {
    /// Random product and variant lookups
    Lookup,
    /// No database access; measures harness overhead
    Noop,
}
