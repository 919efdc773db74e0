//! Deterministic row generator for storebench.
//!
//! This crate provides the [`TableWriter`] which produces the rows of one
//! catalog table as SQL value tuples. Each writer owns a seeded RNG and a
//! primary key counter, so running one writer per table concurrently yields
//! the same dataset as running them one after another.
//!
//! # Architecture
//!
//! ```text
//! TableDescriptor (bench-catalog)
//!        │
//!        ▼
//! ┌─────────────────┐
//! │   TableWriter   │
//! │                 │
//! │  - next_key     │
//! │  - rng (StdRng) │
//! │  - values buf   │
//! └────────┬────────┘
//!          │
//!          ▼
//!    Batch { values: "(1,'..'),(2,'..')", rows, first_key }
//! ```
//!
//! # Example
//!
//! ```rust
//! use bench_catalog::{RowTargets, SchemaCatalog, SchemaVariant, TableName};
//! use bench_generator::{TableWriter, DEFAULT_BATCH_SIZE};
//!
//! let catalog = SchemaCatalog::new(SchemaVariant::Normal, RowTargets::default()).unwrap();
//! let merchant = catalog.get_table(TableName::Merchant).unwrap().clone();
//!
//! let mut writer = TableWriter::new(merchant, 42, DEFAULT_BATCH_SIZE).unwrap();
//! let batch = writer.next_batch().unwrap();
//! assert_eq!(batch.first_key, 1);
//! ```

pub mod generators;
pub mod writer;

// Re-exports for convenience
pub use writer::{Batch, GeneratorError, Rows, TableWriter, DEFAULT_BATCH_SIZE};
