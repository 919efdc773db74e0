//! Schema catalog for storebench.
//!
//! This crate describes the merchant/product/variant/store schema that the
//! generator populates and the harness queries:
//!
//! - [`TableName`] - The four generated tables
//! - [`ColumnKind`] - How each column's values are produced
//! - [`TableDescriptor`] - Columns, primary key, row target and interleave parent
//! - [`SchemaCatalog`] - All tables for one schema variant, in dependency order
//!
//! # Architecture
//!
//! ```text
//! bench-catalog (this crate)
//!    │
//!    ├─── bench-generator  (one TableWriter per TableDescriptor)
//!    ├─── bench-populate   (DDL + batch INSERTs per table)
//!    └─── storebench       (workload queries use the row targets)
//! ```
//!
//! # Example
//!
//! ```rust
//! use bench_catalog::{RowTargets, SchemaCatalog, SchemaVariant, TableName};
//!
//! let catalog = SchemaCatalog::new(SchemaVariant::Normal, RowTargets::default()).unwrap();
//! let product = catalog.get_table(TableName::Product).unwrap();
//! println!("{}", bench_catalog::create_table_sql(product));
//! ```

pub mod ddl;
pub mod schema;
pub mod types;

pub use ddl::{create_table_sql, insert_prefix};
pub use schema::{CatalogError, ColumnDefinition, Interleave, SchemaCatalog, TableDescriptor};
pub use types::{ColumnKind, RowTargets, SchemaVariant, TableName};
