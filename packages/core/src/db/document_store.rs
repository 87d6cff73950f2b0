//! DocumentStore Trait - Persistence Abstraction
//!
//! The persistence collaborator of the editor. Backends are swappable behind
//! `Arc<dyn DocumentStore>`; the editing session and catalogue only talk to
//! this trait.
//!
//! # Examples
//!
//! ```rust
//! use portfolio_core::db::{DocumentStore, InMemoryStore};
//! use portfolio_core::models::{Document, DocumentKind};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let store: Arc<dyn DocumentStore> = Arc::new(InMemoryStore::new());
//! let id = store.save(Document::new(DocumentKind::Tutorial, "Hello")).await?;
//! let loaded = store.load(&id).await?;
//! assert_eq!(loaded.title, "Hello");
//! # Ok::<(), portfolio_core::db::StoreError>(())
//! # });
//! ```

use crate::db::error::StoreResult;
use crate::models::{Document, DocumentId, DocumentPatch};
use async_trait::async_trait;

/// Abstraction over document persistence backends
///
/// Implementations must be `Send + Sync` so a store can be shared by the
/// editing session and spawned save tasks.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace a document, returning its id
    ///
    /// Documents without an id are assigned a fresh UUID v4.
    async fn save(&self, document: Document) -> StoreResult<DocumentId>;

    /// Load a document; a missing id is [`StoreError::NotFound`](crate::db::StoreError::NotFound)
    async fn load(&self, id: &str) -> StoreResult<Document>;

    /// Apply a partial update to a stored document
    async fn update(&self, id: &str, patch: DocumentPatch) -> StoreResult<()>;

    /// Delete a document; deleting a missing id is `NotFound`
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Every stored document, in no particular order
    async fn list(&self) -> StoreResult<Vec<Document>>;

    /// Backend name for logs
    fn name(&self) -> &str;
}

/// Give `document` an id if it has none and return it
pub(crate) fn ensure_id(document: &mut Document) -> DocumentId {
    document
        .id
        .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
        .clone()
}
