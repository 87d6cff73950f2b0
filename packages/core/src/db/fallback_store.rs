//! Fallback store: switch backends when the primary fails
//!
//! Requests go to the primary store until it reports a backend failure
//! (`Io` or `Unavailable`). The failing request is then retried on the
//! secondary, and every later request goes straight to the secondary.
//! `NotFound` and serialization errors are answers, not failures, and are
//! returned as-is.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::db::document_store::DocumentStore;
use crate::db::error::StoreResult;
use crate::models::{Document, DocumentId, DocumentPatch};

pub struct FallbackStore {
    primary: Arc<dyn DocumentStore>,
    secondary: Arc<dyn DocumentStore>,
    switched: AtomicBool,
}

impl FallbackStore {
    pub fn new(primary: Arc<dyn DocumentStore>, secondary: Arc<dyn DocumentStore>) -> Self {
        Self {
            primary,
            secondary,
            switched: AtomicBool::new(false),
        }
    }

    /// Whether requests are now served by the secondary store
    pub fn is_using_secondary(&self) -> bool {
        self.switched.load(Ordering::SeqCst)
    }

    fn active(&self) -> &Arc<dyn DocumentStore> {
        if self.is_using_secondary() {
            &self.secondary
        } else {
            &self.primary
        }
    }

    async fn run<T, F, Fut>(&self, operation: &str, op: F) -> StoreResult<T>
    where
        F: Fn(Arc<dyn DocumentStore>) -> Fut + Send + Sync,
        Fut: Future<Output = StoreResult<T>> + Send,
        T: Send,
    {
        if self.is_using_secondary() {
            return op(self.secondary.clone()).await;
        }
        match op(self.primary.clone()).await {
            Err(e) if e.is_backend_failure() => {
                tracing::warn!(
                    operation,
                    primary = self.primary.name(),
                    secondary = self.secondary.name(),
                    error = %e,
                    "Primary store failed, switching to secondary"
                );
                self.switched.store(true, Ordering::SeqCst);
                op(self.secondary.clone()).await
            }
            result => result,
        }
    }
}

#[async_trait]
impl DocumentStore for FallbackStore {
    async fn save(&self, document: Document) -> StoreResult<DocumentId> {
        self.run("save", |store| {
            let document = document.clone();
            async move { store.save(document).await }
        })
        .await
    }

    async fn load(&self, id: &str) -> StoreResult<Document> {
        self.run("load", |store| async move { store.load(id).await })
            .await
    }

    async fn update(&self, id: &str, patch: DocumentPatch) -> StoreResult<()> {
        self.run("update", |store| {
            let patch = patch.clone();
            async move { store.update(id, patch).await }
        })
        .await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.run("delete", |store| async move { store.delete(id).await })
            .await
    }

    async fn list(&self) -> StoreResult<Vec<Document>> {
        self.run("list", |store| async move { store.list().await })
            .await
    }

    fn name(&self) -> &str {
        self.active().name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{InMemoryStore, StoreError};
    use crate::models::DocumentKind;

    struct DownStore;

    #[async_trait]
    impl DocumentStore for DownStore {
        async fn save(&self, _document: Document) -> StoreResult<DocumentId> {
            Err(StoreError::unavailable("connection refused"))
        }
        async fn load(&self, _id: &str) -> StoreResult<Document> {
            Err(StoreError::unavailable("connection refused"))
        }
        async fn update(&self, _id: &str, _patch: DocumentPatch) -> StoreResult<()> {
            Err(StoreError::unavailable("connection refused"))
        }
        async fn delete(&self, _id: &str) -> StoreResult<()> {
            Err(StoreError::unavailable("connection refused"))
        }
        async fn list(&self) -> StoreResult<Vec<Document>> {
            Err(StoreError::unavailable("connection refused"))
        }
        fn name(&self) -> &str {
            "down"
        }
    }

    #[tokio::test]
    async fn test_switches_on_backend_failure() {
        let secondary = Arc::new(InMemoryStore::new());
        let store = FallbackStore::new(Arc::new(DownStore), secondary.clone());
        assert_eq!(store.name(), "down");

        let id = store
            .save(Document::new(DocumentKind::Tutorial, "Kept"))
            .await
            .unwrap();
        assert!(store.is_using_secondary());
        assert_eq!(store.name(), "memory");
        assert_eq!(secondary.load(&id).await.unwrap().title, "Kept");
        assert_eq!(store.load(&id).await.unwrap().title, "Kept");
    }

    #[tokio::test]
    async fn test_not_found_does_not_switch() {
        let store = FallbackStore::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
        );
        assert!(matches!(store.load("x").await, Err(StoreError::NotFound { .. })));
        assert!(!store.is_using_secondary());
    }
}
