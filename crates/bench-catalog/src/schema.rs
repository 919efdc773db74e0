//! Table descriptors and the schema catalog.
//!
//! The catalog is built once from a [`SchemaVariant`] and [`RowTargets`] and is
//! read-only afterwards. Foreign-key columns carry the row target of their
//! parent table, so generators never need to look at another table's writer.

use crate::types::{ColumnKind, RowTargets, SchemaVariant, TableName};

// ============================================================================
// Error Types
// ============================================================================

/// Error type for catalog construction.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Unknown schema variant name
    #[error("Unknown schema variant '{0}' (expected 'normal' or 'interleaved')")]
    UnknownVariant(String),

    /// Table must have exactly one primary key sequence column
    #[error("Table '{table}' has {count} primary key sequence columns, expected 1")]
    PrimaryKeySequence { table: TableName, count: usize },

    /// Foreign key references a table that is not generated before this one
    #[error("Table '{table}' references '{parent}' which is not defined before it")]
    ParentOrder { table: TableName, parent: TableName },

    /// Child rows need at least one parent row to point at
    #[error("Table '{table}' has {rows} rows but its parent '{parent}' has none")]
    EmptyParent {
        table: TableName,
        parent: TableName,
        rows: u64,
    },
}

// ============================================================================
// Descriptors
// ============================================================================

/// A single column of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Column name
    pub name: &'static str,
    /// Value generation kind
    pub kind: ColumnKind,
}

impl ColumnDefinition {
    pub fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// Parent relationship of an interleaved table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interleave {
    /// Parent table
    pub parent: TableName,
    /// Prefix columns shared with the parent's primary key
    pub columns: Vec<&'static str>,
}

/// Description of one generated table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    /// Table name
    pub name: TableName,
    /// Columns in insertion order
    pub columns: Vec<ColumnDefinition>,
    /// Primary key column names
    pub primary_key: Vec<&'static str>,
    /// Number of rows to generate
    pub row_count: u64,
    /// Set for child tables of the interleaved variant
    pub interleave: Option<Interleave>,
}

impl TableDescriptor {
    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Tables this one draws foreign keys from.
    pub fn parents(&self) -> impl Iterator<Item = (TableName, u64)> + '_ {
        self.columns.iter().filter_map(|c| match c.kind {
            ColumnKind::ForeignKeyRange { parent, parent_max } => Some((parent, parent_max)),
            _ => None,
        })
    }

    fn validate(&self, defined: &[TableName]) -> Result<(), CatalogError> {
        let pk_count = self
            .columns
            .iter()
            .filter(|c| c.kind == ColumnKind::PrimaryKeySequence)
            .count();
        if pk_count != 1 {
            return Err(CatalogError::PrimaryKeySequence {
                table: self.name,
                count: pk_count,
            });
        }

        for (parent, parent_max) in self.parents() {
            if !defined.contains(&parent) {
                return Err(CatalogError::ParentOrder {
                    table: self.name,
                    parent,
                });
            }
            if self.row_count > 0 && parent_max == 0 {
                return Err(CatalogError::EmptyParent {
                    table: self.name,
                    parent,
                    rows: self.row_count,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Immutable description of every table for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCatalog {
    variant: SchemaVariant,
    tables: Vec<TableDescriptor>,
}

impl SchemaCatalog {
    /// Build the catalog for the given variant and row targets.
    pub fn new(variant: SchemaVariant, targets: RowTargets) -> Result<Self, CatalogError> {
        let tables = base_tables(targets)
            .into_iter()
            .map(|mut table| {
                if variant == SchemaVariant::Interleaved {
                    table.interleave = interleave_for(table.name);
                }
                table
            })
            .collect();
        Self::from_tables(variant, tables)
    }

    /// Build a catalog from explicit descriptors, validating their order.
    pub fn from_tables(
        variant: SchemaVariant,
        tables: Vec<TableDescriptor>,
    ) -> Result<Self, CatalogError> {
        let mut defined = Vec::with_capacity(tables.len());
        for table in &tables {
            table.validate(&defined)?;
            defined.push(table.name);
        }
        Ok(Self { variant, tables })
    }

    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    /// Tables in dependency order.
    pub fn tables(&self) -> &[TableDescriptor] {
        &self.tables
    }

    pub fn get_table(&self, name: TableName) -> Option<&TableDescriptor> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn table_names(&self) -> Vec<&'static str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Total rows across all tables.
    pub fn total_rows(&self) -> u64 {
        self.tables.iter().map(|t| t.row_count).sum()
    }
}

fn base_tables(targets: RowTargets) -> Vec<TableDescriptor> {
    use ColumnKind::*;

    let merchant_fk = ForeignKeyRange {
        parent: TableName::Merchant,
        parent_max: targets.merchants,
    };
    let product_fk = ForeignKeyRange {
        parent: TableName::Product,
        parent_max: targets.products,
    };

    vec![
        TableDescriptor {
            name: TableName::Merchant,
            columns: vec![
                ColumnDefinition::new("m_id", PrimaryKeySequence),
                ColumnDefinition::new("m_name", RandomText),
                ColumnDefinition::new("m_address", RandomText),
            ],
            primary_key: vec!["m_id"],
            row_count: targets.merchants,
            interleave: None,
        },
        TableDescriptor {
            name: TableName::Product,
            columns: vec![
                ColumnDefinition::new("p_m_id", merchant_fk),
                ColumnDefinition::new("p_id", PrimaryKeySequence),
                ColumnDefinition::new("p_name", RandomText),
                ColumnDefinition::new("p_desc", RandomText),
            ],
            primary_key: vec!["p_m_id", "p_id"],
            row_count: targets.products,
            interleave: None,
        },
        TableDescriptor {
            name: TableName::Variant,
            columns: vec![
                ColumnDefinition::new("v_m_id", merchant_fk),
                ColumnDefinition::new("v_p_id", product_fk),
                ColumnDefinition::new("v_id", PrimaryKeySequence),
                ColumnDefinition::new("v_name", RandomText),
                ColumnDefinition::new("v_qty", RandomInt),
                ColumnDefinition::new("v_price", RandomDecimal),
            ],
            primary_key: vec!["v_m_id", "v_p_id", "v_id"],
            row_count: targets.variants,
            interleave: None,
        },
        TableDescriptor {
            name: TableName::Store,
            columns: vec![
                ColumnDefinition::new("s_m_id", merchant_fk),
                ColumnDefinition::new("s_id", PrimaryKeySequence),
                ColumnDefinition::new("s_name", RandomText),
                ColumnDefinition::new("s_address", RandomText),
            ],
            primary_key: vec!["s_m_id", "s_id"],
            row_count: targets.stores,
            interleave: None,
        },
    ]
}

fn interleave_for(table: TableName) -> Option<Interleave> {
    match table {
        TableName::Merchant => None,
        TableName::Product => Some(Interleave {
            parent: TableName::Merchant,
            columns: vec!["p_m_id"],
        }),
        TableName::Variant => Some(Interleave {
            parent: TableName::Product,
            columns: vec!["v_m_id", "v_p_id"],
        }),
        TableName::Store => Some(Interleave {
            parent: TableName::Merchant,
            columns: vec!["s_m_id"],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_targets() -> RowTargets {
        RowTargets {
            merchants: 10,
            products: 100,
            variants: 1000,
            stores: 50,
        }
    }

    #[test]
    fn test_normal_catalog_order() {
        let catalog = SchemaCatalog::new(SchemaVariant::Normal, small_targets()).unwrap();
        assert_eq!(
            catalog.table_names(),
            vec!["merchant", "product", "variant", "store"]
        );
        assert!(catalog.tables().iter().all(|t| t.interleave.is_none()));
        assert_eq!(catalog.total_rows(), 1160);
    }

    #[test]
    fn test_foreign_keys_bounded_by_parent_targets() {
        let catalog = SchemaCatalog::new(SchemaVariant::Normal, small_targets()).unwrap();
        let variant = catalog.get_table(TableName::Variant).unwrap();
        let parents: Vec<_> = variant.parents().collect();
        assert_eq!(
            parents,
            vec![(TableName::Merchant, 10), (TableName::Product, 100)]
        );
    }

    #[test]
    fn test_interleaved_catalog() {
        let catalog = SchemaCatalog::new(SchemaVariant::Interleaved, small_targets()).unwrap();
        assert!(catalog
            .get_table(TableName::Merchant)
            .unwrap()
            .interleave
            .is_none());
        let variant = catalog.get_table(TableName::Variant).unwrap();
        let interleave = variant.interleave.as_ref().unwrap();
        assert_eq!(interleave.parent, TableName::Product);
        assert_eq!(interleave.columns, vec!["v_m_id", "v_p_id"]);

        // Column layout does not change with the variant
        let normal = SchemaCatalog::new(SchemaVariant::Normal, small_targets()).unwrap();
        assert_eq!(
            variant.columns,
            normal.get_table(TableName::Variant).unwrap().columns
        );
    }

    #[test]
    fn test_empty_parent_rejected() {
        let targets = RowTargets {
            merchants: 0,
            ..small_targets()
        };
        let err = SchemaCatalog::new(SchemaVariant::Normal, targets).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::EmptyParent {
                parent: TableName::Merchant,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_parent_allowed_without_child_rows() {
        let targets = RowTargets {
            merchants: 0,
            products: 0,
            variants: 0,
            stores: 0,
        };
        assert!(SchemaCatalog::new(SchemaVariant::Normal, targets).is_ok());
    }

    #[test]
    fn test_parent_order_rejected() {
        let mut tables = base_tables(small_targets());
        tables.swap(0, 1);
        let err = SchemaCatalog::from_tables(SchemaVariant::Normal, tables).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::ParentOrder {
                table: TableName::Product,
                parent: TableName::Merchant
            }
        ));
    }

    #[test]
    fn test_missing_primary_key_rejected() {
        let mut tables = base_tables(small_targets());
        tables[0].columns[0].kind = ColumnKind::RandomInt;
        let err = SchemaCatalog::from_tables(SchemaVariant::Normal, tables).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::PrimaryKeySequence { count: 0, .. }
        ));
    }
}
