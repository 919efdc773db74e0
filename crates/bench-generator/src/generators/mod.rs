//! Individual value generators for the column kinds.
//!
//! Every generator appends its rendered SQL literal to an output buffer so a
//! whole batch can be built without intermediate allocations.

pub mod numeric;
pub mod text;

use bench_catalog::ColumnKind;
use rand::Rng;
use std::fmt::Write;

/// Append the literal for one column to `out`.
///
/// `next_key` is the table's primary key counter; it is post-incremented
/// when the column is the primary key sequence.
pub fn write_value<R: Rng>(
    kind: &ColumnKind,
    rng: &mut R,
    next_key: &mut u64,
    scratch: &mut String,
    out: &mut String,
) {
    match kind {
        ColumnKind::PrimaryKeySequence => {
            let _ = write!(out, "{next_key}");
            *next_key += 1;
        }
        ColumnKind::ForeignKeyRange { parent_max, .. } => {
            numeric::write_foreign_key(rng, *parent_max, out)
        }
        ColumnKind::RandomInt => numeric::write_int(rng, out),
        ColumnKind::RandomText => text::write_text(rng, scratch, out),
        ColumnKind::RandomDecimal => numeric::write_decimal(rng, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_catalog::TableName;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_primary_key_post_increment() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut key = 1;
        let mut scratch = String::new();
        let mut out = String::new();

        write_value(
            &ColumnKind::PrimaryKeySequence,
            &mut rng,
            &mut key,
            &mut scratch,
            &mut out,
        );
        out.push(',');
        write_value(
            &ColumnKind::PrimaryKeySequence,
            &mut rng,
            &mut key,
            &mut scratch,
            &mut out,
        );

        assert_eq!(out, "1,2");
        assert_eq!(key, 3);
    }

    #[test]
    fn test_primary_key_does_not_consume_rng() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut untouched = StdRng::seed_from_u64(1);
        let mut key = 1;
        let mut scratch = String::new();
        let mut out = String::new();

        write_value(
            &ColumnKind::PrimaryKeySequence,
            &mut rng,
            &mut key,
            &mut scratch,
            &mut out,
        );

        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn test_foreign_key_uses_parent_max() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut key = 1;
        let mut scratch = String::new();
        let kind = ColumnKind::ForeignKeyRange {
            parent: TableName::Merchant,
            parent_max: 1,
        };

        for _ in 0..20 {
            let mut out = String::new();
            write_value(&kind, &mut rng, &mut key, &mut scratch, &mut out);
            assert_eq!(out, "1");
        }
        assert_eq!(key, 1);
    }
}
