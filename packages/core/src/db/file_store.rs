//! JSON file document store
//!
//! One pretty-printed JSON file per document, named `<id>.json`, inside a
//! single directory. Writes go to a temporary sibling file first and are
//! renamed into place.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::db::document_store::{ensure_id, DocumentStore};
use crate::db::error::{StoreError, StoreResult};
use crate::models::{Document, DocumentId, DocumentPatch};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `dir`; the directory is created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File for `id`, or `None` for ids that would escape the directory
    fn path_for(&self, id: &str) -> Option<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| self.dir.join(format!("{}.json", id)))
    }

    async fn write(&self, id: &str, document: &Document) -> StoreResult<()> {
        let path = self.path_for(id).ok_or_else(|| StoreError::not_found(id))?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_vec_pretty(document)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn save(&self, mut document: Document) -> StoreResult<DocumentId> {
        let id = ensure_id(&mut document);
        self.write(&id, &document).await?;
        tracing::debug!(document_id = %id, dir = %self.dir.display(), "Saved document file");
        Ok(id)
    }

    async fn load(&self, id: &str) -> StoreResult<Document> {
        let path = self.path_for(id).ok_or_else(|| StoreError::not_found(id))?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::not_found(id)),
            Err(e) => return Err(e.into()),
        };
        let mut document: Document = serde_json::from_slice(&bytes)?;
        document.normalize();
        Ok(document)
    }

    async fn update(&self, id: &str, patch: DocumentPatch) -> StoreResult<()> {
        let mut document = self.load(id).await?;
        document.apply_patch(patch);
        self.write(id, &document).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let path = self.path_for(id).ok_or_else(|| StoreError::not_found(id))?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> StoreResult<Vec<Document>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let bytes = tokio::fs::read(&path).await?;
            match serde_json::from_slice::<Document>(&bytes) {
                Ok(mut document) => {
                    document.normalize();
                    documents.push(document);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable document file");
                }
            }
        }
        Ok(documents)
    }

    fn name(&self) -> &str {
        "json-file"
    }
}
