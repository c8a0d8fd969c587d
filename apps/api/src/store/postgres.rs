use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;

use crate::errors::AppError;
use crate::store::ContentStore;

/// Postgres-backed store. All resources share the `content_documents` table,
/// keyed by `(resource, position)`.
#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn list(&self, resource: &str) -> Result<Vec<Value>, AppError> {
        sqlx::query_scalar::<_, Value>(
            "SELECT data FROM content_documents WHERE resource = $1 ORDER BY position ASC",
        )
        .bind(resource)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)
    }

    /// Delete and re-insert inside one transaction. Concurrent writers to the
    /// same resource are serialized by a transaction-scoped advisory lock, so
    /// the last commit wins.
    async fn replace_all(&self, resource: &str, documents: Vec<Value>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(resource)
            .execute(&mut *tx)
            .await
            .map_err(store_error)?;

        let removed = sqlx::query("DELETE FROM content_documents WHERE resource = $1")
            .bind(resource)
            .execute(&mut *tx)
            .await
            .map_err(store_error)?
            .rows_affected();

        for (position, doc) in documents.iter().enumerate() {
            sqlx::query(
                "INSERT INTO content_documents (resource, position, data) VALUES ($1, $2, $3)",
            )
            .bind(resource)
            .bind(position_index(position)?)
            .bind(doc)
            .execute(&mut *tx)
            .await
            .map_err(store_error)?;
        }

        tx.commit().await.map_err(store_error)?;

        debug!(
            "Replaced {resource}: removed {removed}, inserted {}",
            documents.len()
        );
        Ok(())
    }
}

/// `position` is an `INTEGER` column.
fn position_index(position: usize) -> Result<i32, AppError> {
    i32::try_from(position).map_err(|_| {
        AppError::Validation(format!("Too many documents: position {position} is out of range"))
    })
}

/// Connection-level failures mean the store is unreachable (503); anything
/// else is a plain database error (500).
fn store_error(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => AppError::ServiceUnavailable(err.to_string()),
        other => AppError::Database(other),
    }
}
