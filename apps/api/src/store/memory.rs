use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::store::ContentStore;

/// Process-local store used for `memory://` and in tests. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    resources: RwLock<HashMap<String, Vec<Value>>>,
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn list(&self, resource: &str) -> Result<Vec<Value>, AppError> {
        Ok(self
            .resources
            .read()
            .await
            .get(resource)
            .cloned()
            .unwrap_or_default())
    }

    async fn replace_all(&self, resource: &str, documents: Vec<Value>) -> Result<(), AppError> {
        // Swap under the write lock so no reader sees a half-replaced resource.
        self.resources
            .write()
            .await
            .insert(resource.to_string(), documents);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_unknown_resource_is_empty() {
        let store = MemoryContentStore::default();
        assert!(store.list("skills").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_discards_previous_documents() {
        let store = MemoryContentStore::default();
        store
            .replace_all("projects", vec![json!({"title": "A"}), json!({"title": "B"})])
            .await
            .unwrap();
        store
            .replace_all("projects", vec![json!({"title": "C"})])
            .await
            .unwrap();

        assert_eq!(
            store.list("projects").await.unwrap(),
            vec![json!({"title": "C"})]
        );
    }

    #[tokio::test]
    async fn test_resources_are_isolated() {
        let store = MemoryContentStore::default();
        store
            .replace_all("skills", vec![json!({"title": "Rust"})])
            .await
            .unwrap();
        store.replace_all("services", vec![]).await.unwrap();

        assert_eq!(store.list("skills").await.unwrap().len(), 1);
        assert!(store.list("services").await.unwrap().is_empty());
    }
}
