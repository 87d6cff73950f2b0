//! Online clipboard snippets
//!
//! A snippet is a throwaway paste identified by a short share code. It is
//! readable until `expires_at`, after which the clipboard service refuses it
//! and eventually purges it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of generated share codes
pub const SHARE_CODE_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardSnippet {
    /// Short share code, lowercase hex
    pub code: String,
    pub content: String,
    /// Detected or user-chosen language for highlighting
    pub language: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ClipboardSnippet {
    pub fn new(content: impl Into<String>, language: impl Into<String>, ttl: Duration) -> Self {
        let created_at = Utc::now();
        Self {
            code: Self::generate_code(),
            content: content.into(),
            language: language.into(),
            created_at,
            expires_at: created_at + ttl,
        }
    }

    pub fn generate_code() -> String {
        Uuid::new_v4().simple().to_string()[..SHARE_CODE_LEN].to_string()
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
