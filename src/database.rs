//! Benchmark database lifecycle.

use crate::config::{Dbms, RunConfig};
use crate::logging::mask_connection_password;
use anyhow::Context;
use tokio_postgres::{Client, NoTls};
use tracing::{error, info};

/// Open a single connection and check it with `SELECT 1`.
pub async fn connect(connection_string: &str) -> anyhow::Result<Client> {
    info!(
        "Connecting to database: {}",
        mask_connection_password(connection_string)
    );
    let (client, connection) = tokio_postgres::connect(connection_string, NoTls)
        .await
        .context("Failed to connect to database")?;

    // Spawn the connection task
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            error!("Database connection error: {}", e);
        }
    });

    // Test connection
    client
        .simple_query("SELECT 1")
        .await
        .context("Database connection check failed")?;
    Ok(client)
}

/// PostgreSQL has no `CASCADE` on `DROP DATABASE`.
pub fn drop_database_sql(dbms: Dbms, name: &str) -> String {
    match dbms {
        Dbms::Cockroach => format!("DROP DATABASE IF EXISTS {name} CASCADE"),
        Dbms::Postgres => format!("DROP DATABASE IF EXISTS {name}"),
    }
}

pub fn create_database_sql(name: &str) -> String {
    format!("CREATE DATABASE {name}")
}

/// Drop (with `--drop`) and create the benchmark database.
///
/// Statements run on the administrative connection; PostgreSQL cannot drop
/// the database it is connected to.
pub async fn recreate_database(config: &RunConfig) -> anyhow::Result<()> {
    let client = connect(&config.admin_url).await?;

    if config.drop {
        info!("Dropping database {}", config.database);
        client
            .batch_execute(&drop_database_sql(config.dbms, &config.database))
            .await
            .context("could not drop database")?;
        info!("Dropping database complete");
    }

    info!("Creating database {}", config.database);
    client
        .batch_execute(&create_database_sql(&config.database))
        .await
        .context("could not create database")?;
    info!("Creating database complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_statements() {
        assert_eq!(
            drop_database_sql(Dbms::Cockroach, "storebench_normal"),
            "DROP DATABASE IF EXISTS storebench_normal CASCADE"
        );
        assert_eq!(
            drop_database_sql(Dbms::Postgres, "storebench_normal"),
            "DROP DATABASE IF EXISTS storebench_normal"
        );
        assert_eq!(
            create_database_sql("storebench_interleaved"),
            "CREATE DATABASE storebench_interleaved"
        );
    }

    #[tokio::test]
    async fn test_connect_refused() {
        // Nothing listens on port 1
        let result = connect("postgres://root@127.0.0.1:1/storebench_normal?connect_timeout=2").await;
        let err = result.unwrap_err();
        assert!(format!("{err:#}").starts_with("Failed to connect to database"));
    }
}
