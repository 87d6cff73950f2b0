//! Store Error Types
//!
//! Errors raised by [`DocumentStore`](crate::db::DocumentStore) backends.
//! The core never retries them; `FallbackStore` is the only place that reacts
//! to a failing backend.

use crate::models::DocumentId;
use thiserror::Error;

/// Persistence errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document stored under `id`
    #[error("Document not found: {id}")]
    NotFound { id: DocumentId },

    /// Filesystem failure in a file-backed store
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored JSON could not be read or written
    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend cannot serve requests right now
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn not_found(id: impl Into<DocumentId>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Whether another backend could plausibly serve the same request
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, StoreError::Io(_) | StoreError::Unavailable(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
