//! storebench: populate a merchant/product/variant/store schema with
//! deterministic data and benchmark point lookups against it.

pub mod config;
pub mod database;
pub mod dump;
pub mod logging;
pub mod populate;
pub mod shutdown;
pub mod workload;

pub use config::{Cli, Dbms, RunConfig, WorkloadKind};
pub use workload::PointLookupWorkload;
