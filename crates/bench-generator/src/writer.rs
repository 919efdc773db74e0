//! Per-table writer producing serialized value tuples.

use crate::generators::text::TEXT_LEN;
use crate::generators::write_value;
use bench_catalog::{ColumnDefinition, ColumnKind, TableDescriptor, TableName};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Default number of rows per INSERT statement.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Error type for generator construction.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Batch size of zero would never make progress
    #[error("Batch size must be at least 1")]
    ZeroBatchSize,

    /// Foreign key has no parent rows to reference
    #[error("Column '{column}' of table '{table}' references '{parent}' which has no rows")]
    EmptyParent {
        table: TableName,
        column: &'static str,
        parent: TableName,
    },
}

/// One batch of serialized tuples, borrowed from the writer's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch<'a> {
    /// Comma-separated tuples, e.g. `(1,'abc'),(2,'def')`
    pub values: &'a str,
    /// Number of tuples in `values`
    pub rows: u64,
    /// Primary key of the first tuple
    pub first_key: u64,
}

/// Generates the rows of a single table.
///
/// Each writer owns its primary key counter and its random stream, so
/// writers for different tables can run concurrently and still produce the
/// same data for the same seed. Columns are filled in descriptor order, which
/// fixes the order the random stream is consumed in.
pub struct TableWriter {
    table: TableDescriptor,
    /// Next primary key to hand out; starts at 1 and never resets
    next_key: u64,
    rng: StdRng,
    batch_size: usize,
    remaining: u64,
    /// Scratch space for a single text value
    scratch: String,
    /// Reused buffer holding the current batch of tuples
    values: String,
}

impl TableWriter {
    /// Create a writer for `table`, seeded with `seed`.
    pub fn new(
        table: TableDescriptor,
        seed: i64,
        batch_size: usize,
    ) -> Result<Self, GeneratorError> {
        if batch_size == 0 {
            return Err(GeneratorError::ZeroBatchSize);
        }
        if table.row_count > 0 {
            for column in &table.columns {
                if let ColumnKind::ForeignKeyRange {
                    parent,
                    parent_max: 0,
                } = column.kind
                {
                    return Err(GeneratorError::EmptyParent {
                        table: table.name,
                        column: column.name,
                        parent,
                    });
                }
            }
        }

        let row_hint = row_width_hint(&table.columns);
        let buffered_rows = batch_size.min(table.row_count as usize);
        Ok(Self {
            remaining: table.row_count,
            table,
            next_key: 1,
            rng: StdRng::seed_from_u64(seed as u64),
            batch_size,
            scratch: String::with_capacity(TEXT_LEN + 2),
            values: String::with_capacity(buffered_rows * row_hint),
        })
    }

    pub fn table(&self) -> &TableDescriptor {
        &self.table
    }

    pub fn name(&self) -> TableName {
        self.table.name
    }

    /// Rows left before the table reaches its target.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Primary key the next generated row will receive.
    pub fn next_key(&self) -> u64 {
        self.next_key
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Generate the next tuple as an owned string.
    pub fn next_row(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        let mut tuple = String::with_capacity(row_width_hint(&self.table.columns));
        write_tuple(
            &self.table.columns,
            &mut self.rng,
            &mut self.next_key,
            &mut self.scratch,
            &mut tuple,
        );
        self.remaining -= 1;
        Some(tuple)
    }

    /// Lazily generate all remaining tuples.
    pub fn rows(&mut self) -> Rows<'_> {
        Rows { writer: self }
    }

    /// Generate the next batch into the reused values buffer.
    ///
    /// Returns `None` once the table target is exhausted. The final batch
    /// holds whatever remains.
    pub fn next_batch(&mut self) -> Option<Batch<'_>> {
        if self.remaining == 0 {
            return None;
        }
        let rows = self.remaining.min(self.batch_size as u64);
        let first_key = self.next_key;

        self.values.clear();
        for i in 0..rows {
            if i > 0 {
                self.values.push(',');
            }
            write_tuple(
                &self.table.columns,
                &mut self.rng,
                &mut self.next_key,
                &mut self.scratch,
                &mut self.values,
            );
        }
        self.remaining -= rows;

        Some(Batch {
            values: &self.values,
            rows,
            first_key,
        })
    }
}

/// Iterator over the remaining tuples of a [`TableWriter`].
pub struct Rows<'a> {
    writer: &'a mut TableWriter,
}

impl Iterator for Rows<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.writer.next_row()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.writer.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}

fn write_tuple(
    columns: &[ColumnDefinition],
    rng: &mut StdRng,
    next_key: &mut u64,
    scratch: &mut String,
    out: &mut String,
) {
    out.push('(');
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_value(&column.kind, rng, next_key, scratch, out);
    }
    out.push(')');
}

fn row_width_hint(columns: &[ColumnDefinition]) -> usize {
    let values: usize = columns
        .iter()
        .map(|c| match c.kind {
            ColumnKind::RandomText => TEXT_LEN + 2,
            _ => 8,
        })
        .sum();
    values + columns.len() + 2
}
