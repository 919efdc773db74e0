//! CLI argument definitions for data population.

use bench_catalog::RowTargets;
use bench_generator::DEFAULT_BATCH_SIZE;
use clap::Args;

/// Arguments controlling what `--load` generates.
#[derive(Args, Clone, Debug)]
pub struct PopulateArgs {
    /// Pseudo-random seed used to generate data (same seed = same data)
    #[arg(long, default_value_t = 42, allow_negative_numbers = true)]
    pub seed: i64,

    /// Number of rows in table <merchant> to generate
    #[arg(long, default_value_t = 10_000)]
    pub merchants: u64,

    /// Number of rows in table <product> to generate
    #[arg(long, default_value_t = 1_000_000)]
    pub products: u64,

    /// Number of rows in table <variant> to generate
    #[arg(long, default_value_t = 10_000_000)]
    pub variants: u64,

    /// Number of rows in table <store> to generate
    #[arg(long, default_value_t = 50_000)]
    pub stores: u64,

    /// Rows per INSERT statement
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,
}

impl PopulateArgs {
    /// Row targets for the catalog.
    pub fn row_targets(&self) -> RowTargets {
        RowTargets {
            merchants: self.merchants,
            products: self.products,
            variants: self.variants,
            stores: self.stores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        populate: PopulateArgs,
    }

    #[test]
    fn test_defaults_match_row_targets() {
        let cli = TestCli::parse_from(["test"]);
        assert_eq!(cli.populate.seed, 42);
        assert_eq!(cli.populate.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(cli.populate.row_targets(), RowTargets::default());
    }

    #[test]
    fn test_overrides() {
        let cli = TestCli::parse_from([
            "test",
            "--seed",
            "-7",
            "--merchants",
            "10",
            "--products",
            "100",
            "--batch-size",
            "64",
        ]);
        assert_eq!(cli.populate.seed, -7);
        assert_eq!(cli.populate.batch_size, 64);
        let targets = cli.populate.row_targets();
        assert_eq!(targets.merchants, 10);
        assert_eq!(targets.products, 100);
    }
}
