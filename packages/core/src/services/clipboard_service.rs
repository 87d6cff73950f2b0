//! Online clipboard
//!
//! Short-lived code snippets shared by code. Languages are auto-detected
//! when the paster does not choose one.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::config::PortfolioConfig;
use crate::models::{ClipboardSnippet, DEFAULT_CODE_LANGUAGE};
use crate::services::error::ServiceError;
use crate::utils::{detect_language, PLAINTEXT};

pub struct ClipboardService {
    snippets: RwLock<HashMap<String, ClipboardSnippet>>,
    ttl: Duration,
    fallback_language: String,
}

impl ClipboardService {
    pub fn new(ttl: Duration) -> Self {
        Self {
            snippets: RwLock::new(HashMap::new()),
            ttl,
            fallback_language: DEFAULT_CODE_LANGUAGE.to_string(),
        }
    }

    pub fn from_config(config: &PortfolioConfig) -> Self {
        Self {
            fallback_language: config.default_code_language.clone(),
            ..Self::new(config.clipboard_ttl())
        }
    }

    /// Store a new snippet and return it with its share code
    ///
    /// Without an explicit language the content is auto-detected; content
    /// nothing recognizes gets the configured default language.
    pub async fn create(
        &self,
        content: &str,
        language: Option<&str>,
    ) -> Result<ClipboardSnippet, ServiceError> {
        if content.trim().is_empty() {
            return Err(ServiceError::Validation("clipboard content cannot be empty".to_string()));
        }
        let language = match language.map(str::trim).filter(|l| !l.is_empty()) {
            Some(language) => language.to_string(),
            None => match detect_language(content) {
                PLAINTEXT => self.fallback_language.clone(),
                detected => detected.to_string(),
            },
        };

        let mut snippets = self.snippets.write().await;
        drop_expired(&mut snippets);
        let mut snippet = ClipboardSnippet::new(content, language, self.ttl);
        while snippets.contains_key(&snippet.code) {
            snippet.code = ClipboardSnippet::generate_code();
        }
        tracing::debug!(code = %snippet.code, language = %snippet.language, "Created clipboard snippet");
        snippets.insert(snippet.code.clone(), snippet.clone());
        Ok(snippet)
    }

    /// Fetch a snippet by share code; expired snippets are dropped and refused
    pub async fn get(&self, code: &str) -> Result<ClipboardSnippet, ServiceError> {
        let code = code.trim().to_ascii_lowercase();
        let mut snippets = self.snippets.write().await;
        match snippets.get(&code) {
            None => Err(ServiceError::snippet_not_found(code)),
            Some(snippet) if snippet.is_expired() => {
                snippets.remove(&code);
                Err(ServiceError::snippet_expired(code))
            }
            Some(snippet) => Ok(snippet.clone()),
        }
    }

    /// Drop every expired snippet, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let mut snippets = self.snippets.write().await;
        drop_expired(&mut snippets)
    }

    pub async fn len(&self) -> usize {
        self.snippets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snippets.read().await.is_empty()
    }
}

fn drop_expired(snippets: &mut HashMap<String, ClipboardSnippet>) -> usize {
    let now = Utc::now();
    let before = snippets.len();
    snippets.retain(|_, s| !s.is_expired_at(now));
    let purged = before - snippets.len();
    if purged > 0 {
        tracing::info!(purged, "Purged expired clipboard snippets");
    }
    purged
}
