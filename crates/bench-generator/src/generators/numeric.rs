//! Numeric value generators.

use rand::Rng;
use std::fmt::Write;

/// Upper bound (exclusive) for random integer columns.
pub const INT_MAX: u64 = 42;

/// Upper bound (exclusive) for random decimal columns.
pub const DEC_MAX: f64 = 42.0;

/// Append a uniform integer in `[1, max]`.
pub fn write_foreign_key<R: Rng>(rng: &mut R, max: u64, out: &mut String) {
    let _ = write!(out, "{}", rng.gen_range(1..=max));
}

/// Append a uniform integer in `[0, INT_MAX)`.
pub fn write_int<R: Rng>(rng: &mut R, out: &mut String) {
    let _ = write!(out, "{}", rng.gen_range(0..INT_MAX));
}

/// Append a uniform decimal in `[0, DEC_MAX)` with two fractional digits.
pub fn write_decimal<R: Rng>(rng: &mut R, out: &mut String) {
    let value = rng.gen::<f64>() * DEC_MAX;
    let _ = write!(out, "{value:.2}");
}
