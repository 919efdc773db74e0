//! Table names, column kinds and schema variants.

use std::fmt;
use std::str::FromStr;

/// One of the four tables of the storebench schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableName {
    Merchant,
    Product,
    Variant,
    Store,
}

impl TableName {
    /// SQL table name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Merchant => "merchant",
            TableName::Product => "product",
            TableName::Variant => "variant",
            TableName::Store => "store",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the values of a column are produced.
///
/// The kind also determines the SQL type of the column, see [`ColumnKind::sql_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Per-table counter starting at 1.
    PrimaryKeySequence,

    /// Uniform integer in `[1, parent_max]`, where `parent_max` is the
    /// row target of the referenced table.
    ForeignKeyRange {
        /// Referenced table
        parent: TableName,
        /// Highest primary key the parent table will hold
        parent_max: u64,
    },

    /// Uniform integer in `[0, INT_MAX)`.
    RandomInt,

    /// Fixed-length quoted string.
    RandomText,

    /// Uniform float rendered with two fractional digits.
    RandomDecimal,
}

impl ColumnKind {
    /// SQL column type used in `CREATE TABLE`.
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnKind::PrimaryKeySequence | ColumnKind::ForeignKeyRange { .. } => {
                "integer not null"
            }
            ColumnKind::RandomInt => "integer",
            ColumnKind::RandomText => "text",
            ColumnKind::RandomDecimal => "decimal",
        }
    }
}

/// Table layout flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaVariant {
    /// Flat tables.
    #[default]
    Normal,
    /// Child tables interleaved in their parent (CockroachDB only).
    Interleaved,
}

impl SchemaVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVariant::Normal => "normal",
            SchemaVariant::Interleaved => "interleaved",
        }
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVariant {
    type Err = crate::CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(SchemaVariant::Normal),
            "interleaved" => Ok(SchemaVariant::Interleaved),
            other => Err(crate::CatalogError::UnknownVariant(other.to_string())),
        }
    }
}

/// Number of rows to generate for each table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowTargets {
    pub merchants: u64,
    pub products: u64,
    pub variants: u64,
    pub stores: u64,
}

impl Default for RowTargets {
    fn default() -> Self {
        Self {
            merchants: 10_000,
            products: 1_000_000,
            variants: 10_000_000,
            stores: 50_000,
        }
    }
}
