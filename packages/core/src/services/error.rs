//! Service Layer Error Types

use crate::db::StoreError;
use crate::models::ValidationError;
use thiserror::Error;

/// Errors surfaced to the UI by the service layer
///
/// Store failures pass through unchanged so the UI can tell a missing
/// document from an unreachable backend.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Persistence collaborator failed
    #[error("Storage operation failed: {0}")]
    Store(#[from] StoreError),

    /// Editor-only operation without a valid admin session
    #[error("Admin login required")]
    Unauthorized,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Clipboard snippet not found: {code}")]
    SnippetNotFound { code: String },

    #[error("Clipboard snippet expired: {code}")]
    SnippetExpired { code: String },

    /// A spawned background task panicked or was cancelled
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl ServiceError {
    pub fn snippet_not_found(code: impl Into<String>) -> Self {
        Self::SnippetNotFound { code: code.into() }
    }

    pub fn snippet_expired(code: impl Into<String>) -> Self {
        Self::SnippetExpired { code: code.into() }
    }
}
