//! In-memory document store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::document_store::{ensure_id, DocumentStore};
use crate::db::error::{StoreError, StoreResult};
use crate::models::{Document, DocumentId, DocumentPatch};

/// Documents held in a `RwLock<HashMap>`; used for tests and previews
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: RwLock<HashMap<DocumentId, Document>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn save(&self, mut document: Document) -> StoreResult<DocumentId> {
        let id = ensure_id(&mut document);
        self.documents.write().await.insert(id.clone(), document);
        tracing::debug!(document_id = %id, "Saved document in memory");
        Ok(id)
    }

    async fn load(&self, id: &str) -> StoreResult<Document> {
        self.documents
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn update(&self, id: &str, patch: DocumentPatch) -> StoreResult<()> {
        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(id))?;
        document.apply_patch(patch);
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.documents
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn list(&self) -> StoreResult<Vec<Document>> {
        Ok(self.documents.read().await.values().cloned().collect())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentKind;

    #[tokio::test]
    async fn test_save_assigns_id_and_loads() {
        let store = InMemoryStore::new();
        let id = store
            .save(Document::new(DocumentKind::Solution, "Fix CORS"))
            .await
            .unwrap();
        let loaded = store.load(&id).await.unwrap();
        assert_eq!(loaded.id.as_deref(), Some(id.as_str()));
        assert_eq!(loaded.title, "Fix CORS");
    }

    #[tokio::test]
    async fn test_save_keeps_existing_id() {
        let store = InMemoryStore::new();
        let mut doc = Document::new(DocumentKind::Tutorial, "One");
        doc.id = Some("fixed".to_string());
        assert_eq!(store.save(doc.clone()).await.unwrap(), "fixed");

        doc.title = "Two".to_string();
        store.save(doc).await.unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(store.load("fixed").await.unwrap().title, "Two");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = InMemoryStore::new();
        let id = store
            .save(Document::new(DocumentKind::Tutorial, "Draft"))
            .await
            .unwrap();

        let patch = DocumentPatch {
            published: Some(true),
            ..Default::default()
        };
        store.update(&id, patch).await.unwrap();
        assert!(store.load(&id).await.unwrap().published);

        store.delete(&id).await.unwrap();
        assert!(matches!(
            store.load(&id).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete(&id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_missing() {
        let store = InMemoryStore::new();
        let result = store.update("nope", DocumentPatch::default()).await;
        assert!(matches!(result, Err(StoreError::NotFound { id }) if id == "nope"));
    }
}
