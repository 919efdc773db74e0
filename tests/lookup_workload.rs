//! Lookup workload against a live database.
//!
//! Set `STOREBENCH_TEST_URL` to a disposable CockroachDB or PostgreSQL
//! database to run; without it the test returns early.

use bench_catalog::{RowTargets, SchemaCatalog, SchemaVariant};
use bench_harness::{Harness, HarnessConfig};
use bench_populate::{create_schema, BatchLoader, PgPool, SqlExecutor};
use std::sync::Arc;
use storebench::PointLookupWorkload;

#[tokio::test]
async fn test_more_workers_than_connections() {
    let Ok(connection_string) = std::env::var("STOREBENCH_TEST_URL") else {
        eprintln!("STOREBENCH_TEST_URL not set, skipping");
        return;
    };

    let targets = RowTargets {
        merchants: 5,
        products: 50,
        variants: 200,
        stores: 5,
    };
    let catalog = SchemaCatalog::new(SchemaVariant::Normal, targets).unwrap();
    let pool = Arc::new(PgPool::connect(&connection_string, 2).await.unwrap());

    // Clean up any existing tables
    for table in catalog.tables().iter().rev() {
        pool.execute(&format!("drop table if exists {}", table.name))
            .await
            .unwrap();
    }
    create_schema(pool.as_ref(), &catalog).await.unwrap();
    BatchLoader::new(Arc::clone(&pool))
        .load_all(&catalog, 7, 50)
        .await
        .unwrap();

    let workload = PointLookupWorkload::prepare(Arc::clone(&pool), targets, 7, 8)
        .await
        .unwrap();
    let mut harness = Harness::new(
        HarnessConfig::default()
            .with_concurrency(8)
            .with_max_ops(Some(400)),
    )
    .unwrap();
    let summary = harness
        .run(Arc::new(workload), std::future::pending::<()>(), Vec::new())
        .await
        .unwrap();

    assert_eq!(pool.size(), 2);
    assert_eq!(summary.total_ops, 400);
    assert_eq!(summary.samples, 400);
}
