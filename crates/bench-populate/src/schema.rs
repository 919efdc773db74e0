//! Table creation for the catalog.

use crate::error::PopulateError;
use crate::executor::SqlExecutor;
use bench_catalog::{create_table_sql, SchemaCatalog};
use tracing::{debug, info};

/// Create every table of the catalog, parents first.
pub async fn create_schema<E: SqlExecutor + ?Sized>(
    executor: &E,
    catalog: &SchemaCatalog,
) -> Result<(), PopulateError> {
    info!("Creating tables with {} schema", catalog.variant());
    for table in catalog.tables() {
        let sql = create_table_sql(table);
        debug!("DDL: {}", sql);
        executor
            .execute(&sql)
            .await
            .map_err(|source| PopulateError::Schema {
                table: table.name,
                source,
            })?;
    }
    Ok(())
}

