//! SQL statement rendering for catalog tables.

use crate::schema::TableDescriptor;

/// Generate the CREATE TABLE statement for a table.
///
/// Interleaved tables get the `interleave in parent` clause appended after
/// the column list.
pub fn create_table_sql(table: &TableDescriptor) -> String {
    let mut lines: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("  {} {}", c.name, c.kind.sql_type()))
        .collect();
    lines.push(format!("  primary key ({})", table.primary_key.join(", ")));

    let mut sql = format!("create table {} (\n{}\n)", table.name, lines.join(",\n"));
    if let Some(interleave) = &table.interleave {
        sql.push_str(&format!(
            " interleave in parent {} ({})",
            interleave.parent,
            interleave.columns.join(", ")
        ));
    }
    sql.push(';');
    sql
}

/// Statement prefix that a batch of value tuples is appended to.
pub fn insert_prefix(table: &TableDescriptor) -> String {
    format!(
        "insert into {} ({}) values",
        table.name,
        table.column_names().join(", ")
    )
}
