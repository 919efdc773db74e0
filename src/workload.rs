//! Point lookups against the populated schema.

use async_trait::async_trait;
use bench_catalog::RowTargets;
use bench_harness::{Workload, WorkloadError};
use bench_populate::{ExecutorError, PgPool};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio_postgres::types::Type;
use tracing::debug;

/// Upper bound on connections opened for lookups.
pub const MAX_LOOKUP_CONNECTIONS: usize = 64;

pub const PRODUCT_LOOKUP: &str =
    "select p_id, p_name, p_desc from product where p_m_id = $1 limit 1";

pub const VARIANT_LOOKUP: &str =
    "select v_id, v_name, v_qty, v_price from variant where v_m_id = $1 and v_p_id = $2 limit 1";

/// One lookup, keyed on a primary-key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Product { merchant: i64 },
    Variant { merchant: i64, product: i64 },
}

/// Pick the next lookup: product or variant with equal probability.
pub fn next_lookup<R: Rng>(rng: &mut R, targets: &RowTargets) -> Lookup {
    let merchant = rng.gen_range(1..=targets.merchants.max(1)) as i64;
    if rng.gen_bool(0.5) {
        Lookup::Product { merchant }
    } else {
        let product = rng.gen_range(1..=targets.products.max(1)) as i64;
        Lookup::Variant { merchant, product }
    }
}

/// Connections to open for `workers` lookup workers.
pub fn lookup_pool_size(workers: usize) -> usize {
    workers.clamp(1, MAX_LOOKUP_CONNECTIONS)
}

/// Random product and variant lookups through a [`PgPool`].
///
/// Every operation checks a connection out of the pool and runs a statement
/// prepared once per connection. Worker `w` draws keys from its own
/// generator seeded with `seed + w`.
pub struct PointLookupWorkload {
    pool: Arc<PgPool>,
    rngs: Vec<Mutex<StdRng>>,
    targets: RowTargets,
}

impl PointLookupWorkload {
    /// Check that both lookups prepare, then build one generator per worker.
    pub async fn prepare(
        pool: Arc<PgPool>,
        targets: RowTargets,
        seed: i64,
        workers: usize,
    ) -> Result<Self, ExecutorError> {
        let client = pool.get().await?;
        client
            .prepare_typed_cached(PRODUCT_LOOKUP, &[Type::INT8])
            .await?;
        client
            .prepare_typed_cached(VARIANT_LOOKUP, &[Type::INT8, Type::INT8])
            .await?;
        debug!("Prepared lookup statements (pool size: {})", pool.size());

        let rngs = (0..workers.max(1))
            .map(|w| Mutex::new(worker_rng(seed, w)))
            .collect();

        Ok(Self {
            pool,
            rngs,
            targets,
        })
    }
}

fn worker_rng(seed: i64, worker: usize) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(worker as i64) as u64)
}

#[async_trait]
impl Workload for PointLookupWorkload {
    async fn execute(&self, worker: usize) -> Result<(), WorkloadError> {
        let lookup = {
            let mut rng = self.rngs[worker % self.rngs.len()].lock();
            next_lookup(&mut *rng, &self.targets)
        };

        let client = self.pool.get().await.map_err(WorkloadError::source)?;
        let rows = match lookup {
            Lookup::Product { merchant } => {
                let statement = client
                    .prepare_typed_cached(PRODUCT_LOOKUP, &[Type::INT8])
                    .await
                    .map_err(WorkloadError::source)?;
                client.query(&statement, &[&merchant]).await
            }
            Lookup::Variant { merchant, product } => {
                let statement = client
                    .prepare_typed_cached(VARIANT_LOOKUP, &[Type::INT8, Type::INT8])
                    .await
                    .map_err(WorkloadError::source)?;
                client.query(&statement, &[&merchant, &product]).await
            }
        };
        rows.map_err(WorkloadError::source)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> RowTargets {
        RowTargets {
            merchants: 10,
            products: 100,
            variants: 1000,
            stores: 5,
        }
    }

    #[test]
    fn test_lookups_stay_in_range() {
        let mut rng = worker_rng(42, 0);
        let (mut products, mut variants) = (0, 0);
        for _ in 0..2_000 {
            match next_lookup(&mut rng, &targets()) {
                Lookup::Product { merchant } => {
                    assert!((1..=10).contains(&merchant));
                    products += 1;
                }
                Lookup::Variant { merchant, product } => {
                    assert!((1..=10).contains(&merchant));
                    assert!((1..=100).contains(&product));
                    variants += 1;
                }
            }
        }
        assert!(products > 800 && variants > 800);
    }

    #[test]
    fn test_worker_streams_are_deterministic_and_distinct() {
        let draw = |worker| {
            let mut rng = worker_rng(42, worker);
            (0..20)
                .map(|_| next_lookup(&mut rng, &targets()))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(0), draw(0));
        assert_ne!(draw(0), draw(1));
    }

    #[test]
    fn test_empty_targets_do_not_panic() {
        let empty = RowTargets {
            merchants: 0,
            products: 0,
            variants: 0,
            stores: 0,
        };
        let mut rng = worker_rng(-1, 3);
        for _ in 0..10 {
            next_lookup(&mut rng, &empty);
        }
    }

    #[test]
    fn test_pool_size_is_capped() {
        assert_eq!(lookup_pool_size(0), 1);
        assert_eq!(lookup_pool_size(8), 8);
        assert_eq!(lookup_pool_size(1_000), MAX_LOOKUP_CONNECTIONS);
    }
}
