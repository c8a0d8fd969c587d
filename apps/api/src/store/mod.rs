//! Content Store: one labelled document collection per resource.
//!
//! The store only knows about JSON documents keyed by resource name. The
//! typed helpers at the bottom of this module convert to and from the models
//! in `portfolio_content`.
//!
//! `AppState` holds an `Arc<dyn ContentStore>`, chosen at startup from
//! `DATABASE_URL`.

pub mod memory;
pub mod postgres;

use anyhow::Context;
use async_trait::async_trait;
use portfolio_content::Resource;
use serde_json::Value;

use crate::errors::AppError;

pub use memory::MemoryContentStore;
pub use postgres::PgContentStore;

/// Storage backend for content resources.
///
/// `replace_all` must be atomic: readers observe either the previous
/// documents or the new ones, never an empty or partial resource.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Returns every document of `resource` in insertion order.
    async fn list(&self, resource: &str) -> Result<Vec<Value>, AppError>;

    /// Discards all documents of `resource` and stores `documents` in order.
    async fn replace_all(&self, resource: &str, documents: Vec<Value>) -> Result<(), AppError>;
}

pub async fn load_collection<R: Resource>(store: &dyn ContentStore) -> Result<Vec<R>, AppError> {
    store
        .list(R::NAME)
        .await?
        .into_iter()
        .map(|doc| decode::<R>(doc))
        .collect()
}

/// Returns the first stored document, if any.
pub async fn load_singleton<R: Resource>(store: &dyn ContentStore) -> Result<Option<R>, AppError> {
    store
        .list(R::NAME)
        .await?
        .into_iter()
        .next()
        .map(decode::<R>)
        .transpose()
}

pub async fn save_collection<R: Resource>(
    store: &dyn ContentStore,
    items: &[R],
) -> Result<(), AppError> {
    let documents = items.iter().map(encode).collect::<Result<Vec<_>, _>>()?;
    store.replace_all(R::NAME, documents).await
}

pub async fn save_singleton<R: Resource>(store: &dyn ContentStore, doc: &R) -> Result<(), AppError> {
    store.replace_all(R::NAME, vec![encode(doc)?]).await
}

fn encode<R: Resource>(doc: &R) -> Result<Value, AppError> {
    serde_json::to_value(doc)
        .with_context(|| format!("Failed to encode {} document", R::NAME))
        .map_err(AppError::Internal)
}

fn decode<R: Resource>(doc: Value) -> Result<R, AppError> {
    serde_json::from_value(doc)
        .with_context(|| format!("Stored {} document is malformed", R::NAME))
        .map_err(AppError::Internal)
}
