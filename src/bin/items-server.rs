//! Item server
//!
//! Serves the REST and GraphQL item APIs. Configuration comes from the YAML
//! file named by `ITEMS_CONFIG` (optional) overlaid with environment
//! variables; see [`AppConfig::from_env`].

use items::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let item_service = connect(&config).await?;

    tracing::info!(
        backend = ?config.storage.backend,
        bind = %config.server.bind,
        "starting items server"
    );

    ServerBuilder::new()
        .with_config(config)
        .with_shared_item_service(item_service)
        .serve()
        .await
}

async fn connect(config: &AppConfig) -> Result<Arc<dyn ItemService>> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryItemService::new())),
        StorageBackend::Postgres => connect_postgres(config).await,
    }
}

#[cfg(feature = "postgres")]
async fn connect_postgres(config: &AppConfig) -> Result<Arc<dyn ItemService>> {
    use anyhow::Context;
    use sqlx::postgres::PgPoolOptions;

    let db = &config.database;
    tracing::info!(
        "Connecting to DB with connection string: {}",
        db.redacted_connection_string()
    );

    let pool = PgPoolOptions::new()
        .max_connections(db.max_connections)
        .connect(&db.connection_string())
        .await
        .context("failed to connect to PostgreSQL")?;

    ensure_schema(&pool).await?;

    Ok(Arc::new(PostgresItemService::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn connect_postgres(_config: &AppConfig) -> Result<Arc<dyn ItemService>> {
    anyhow::bail!("PostgreSQL support is not enabled. Rebuild with the 'postgres' feature.")
}
