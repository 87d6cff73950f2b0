//! Editing session: one document, one editor, optimistic persistence
//!
//! The session owns the in-memory [`Document`] being edited and exposes the
//! Content Model operations on it. Saving and publishing update local state
//! first and only then call the store; a failed store call is reported to the
//! caller but does not roll the local state back. Concurrent sessions on the
//! same document are not reconciled, so the last save wins.

use std::sync::Arc;

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::PortfolioConfig;
use crate::db::DocumentStore;
use crate::models::{BlockType, ContentBlock, Document, DocumentId};
use crate::services::auth::AdminSession;
use crate::services::error::ServiceError;

pub struct EditingSession {
    store: Arc<dyn DocumentStore>,
    document: Document,
    admin: AdminSession,
    words_per_minute: u32,
}

impl EditingSession {
    /// Start editing `document` (typically a fresh one from the "new" action)
    pub fn new(store: Arc<dyn DocumentStore>, document: Document, admin: AdminSession) -> Self {
        Self {
            store,
            document,
            admin,
            words_per_minute: PortfolioConfig::default().words_per_minute,
        }
    }

    /// Load a stored document for editing
    pub async fn open(
        store: Arc<dyn DocumentStore>,
        id: &str,
        admin: AdminSession,
    ) -> Result<Self, ServiceError> {
        let document = store.load(id).await?;
        tracing::info!(document_id = %id, "Opened document for editing");
        Ok(Self::new(store, document, admin))
    }

    pub fn with_config(mut self, config: &PortfolioConfig) -> Self {
        self.words_per_minute = config.words_per_minute;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct access for the block editor and metadata forms
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn admin(&self) -> &AdminSession {
        &self.admin
    }

    /// End the session, handing back the edited document
    pub fn into_document(self) -> Document {
        self.document
    }

    //
    // CONTENT MODEL
    //

    pub fn insert(&mut self, block_type: BlockType) -> &ContentBlock {
        self.document.insert(block_type)
    }

    pub fn remove(&mut self, index: usize) -> Option<ContentBlock> {
        self.document.remove(index)
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        self.document.reorder(from, to)
    }

    pub fn add_tag(&mut self, tag: &str) -> bool {
        self.document.add_tag(tag)
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.document.remove_tag(tag)
    }

    //
    // PERSISTENCE
    //

    /// Validate, refresh derived fields and assign an id if needed
    fn prepare_for_save(&mut self) -> Result<Document, ServiceError> {
        self.document.validate()?;
        self.document.refresh_reading_time(self.words_per_minute);
        self.document.touch();
        if self.document.id.is_none() {
            self.document.id = Some(Uuid::new_v4().to_string());
        }
        Ok(self.document.clone())
    }

    pub async fn save(&mut self) -> Result<DocumentId, ServiceError> {
        let snapshot = self.prepare_for_save()?;
        let id = self.store.save(snapshot).await.map_err(|e| {
            tracing::warn!(document_id = ?self.document.id, error = %e, "Save failed");
            e
        })?;
        tracing::info!(document_id = %id, store = self.store.name(), "Saved document");
        Ok(id)
    }

    /// Mark published locally, then save
    pub async fn publish(&mut self) -> Result<DocumentId, ServiceError> {
        self.document.published = true;
        self.save().await
    }

    /// Mark unpublished locally, then save
    pub async fn unpublish(&mut self) -> Result<DocumentId, ServiceError> {
        self.document.published = false;
        self.save().await
    }

    /// Fire-and-forget save of the current state
    ///
    /// Local state is final as soon as this returns; the handle only reports
    /// how the store call went.
    pub fn spawn_save(&mut self) -> JoinHandle<Result<DocumentId, ServiceError>> {
        let prepared = self.prepare_for_save();
        let store = self.store.clone();
        tokio::spawn(async move {
            let snapshot = prepared?;
            let id = store.save(snapshot).await?;
            tracing::debug!(document_id = %id, "Background save finished");
            Ok::<_, ServiceError>(id)
        })
    }
}

/// Await a [`EditingSession::spawn_save`] handle, flattening join failures
pub async fn join_save(
    handle: JoinHandle<Result<DocumentId, ServiceError>>,
) -> Result<DocumentId, ServiceError> {
    handle
        .await
        .map_err(|e| ServiceError::TaskFailed(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{InMemoryStore, StoreError};
    use crate::models::DocumentKind;
    use crate::services::AdminGate;

    fn admin() -> AdminSession {
        AdminGate::new("pw").login("pw").unwrap()
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_reading_time() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = EditingSession::new(
            store.clone(),
            Document::new(DocumentKind::Tutorial, "Routing"),
            admin(),
        );
        session.insert(BlockType::Text);
        session.document_mut().set_block_content(0, "word ".repeat(450));

        let id = session.save().await.unwrap();
        assert_eq!(session.document().id.as_deref(), Some(id.as_str()));
        assert_eq!(session.document().reading_time, 3);
        assert_eq!(store.load(&id).await.unwrap().reading_time, 3);

        assert_eq!(session.save().await.unwrap(), id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_document_is_not_saved() {
        let store = Arc::new(InMemoryStore::new());
        let mut session =
            EditingSession::new(store.clone(), Document::new(DocumentKind::Tutorial, " "), admin());
        assert!(matches!(session.save().await, Err(ServiceError::Validation(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_publish_round_trip() {
        let store = Arc::new(InMemoryStore::new());
        let mut session =
            EditingSession::new(store.clone(), Document::new(DocumentKind::Solution, "Fix"), admin());
        let id = session.publish().await.unwrap();
        assert!(store.load(&id).await.unwrap().published);

        let mut reopened = EditingSession::open(store.clone(), &id, admin()).await.unwrap();
        reopened.unpublish().await.unwrap();
        assert!(!store.load(&id).await.unwrap().published);
    }

    #[tokio::test]
    async fn test_open_missing() {
        let store = Arc::new(InMemoryStore::new());
        let result = EditingSession::open(store, "missing", admin()).await;
        assert!(matches!(
            result,
            Err(ServiceError::Store(StoreError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_spawn_save() {
        let store = Arc::new(InMemoryStore::new());
        let mut session =
            EditingSession::new(store.clone(), Document::new(DocumentKind::Tutorial, "Bg"), admin());
        let handle = session.spawn_save();
        let local_id = session.document().id.clone().unwrap();

        let id = join_save(handle).await.unwrap();
        assert_eq!(id, local_id);
        assert_eq!(store.load(&id).await.unwrap().title, "Bg");
    }
}
