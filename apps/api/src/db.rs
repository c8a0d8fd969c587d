use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::store::{ContentStore, MemoryContentStore, PgContentStore};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS content_documents (
    resource TEXT NOT NULL,
    position INTEGER NOT NULL,
    data JSONB NOT NULL,
    PRIMARY KEY (resource, position)
)
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the content table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(SCHEMA)
        .execute(pool)
        .await
        .context("Failed to create content_documents table")?;
    Ok(())
}

/// Builds the content store selected by `DATABASE_URL`.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn ContentStore>> {
    if config.uses_memory_store() {
        info!("Using in-memory content store; content is lost on restart");
        return Ok(Arc::new(MemoryContentStore::default()));
    }

    let pool = create_pool(&config.database_url).await?;
    ensure_schema(&pool).await?;
    Ok(Arc::new(PgContentStore::new(pool)))
}
