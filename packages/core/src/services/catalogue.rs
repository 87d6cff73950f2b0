//! Read-side queries over stored documents
//!
//! Visitors only ever see published documents. Every listing is sorted
//! newest first by `created_at`.

use std::sync::Arc;

use crate::db::DocumentStore;
use crate::models::{Document, DocumentKind};
use crate::services::auth::AdminSession;
use crate::services::error::ServiceError;

pub struct DocumentCatalogue {
    store: Arc<dyn DocumentStore>,
    kind: Option<DocumentKind>,
}

impl DocumentCatalogue {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store, kind: None }
    }

    /// Restrict every query to tutorials or to solutions
    pub fn of_kind(mut self, kind: DocumentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    async fn collect<F>(&self, include: F) -> Result<Vec<Document>, ServiceError>
    where
        F: Fn(&Document) -> bool,
    {
        let mut documents: Vec<Document> = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|d| self.kind.map_or(true, |k| d.kind == k))
            .filter(|d| include(d))
            .collect();
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(documents)
    }

    /// Every document including drafts, for the editor's dashboard
    pub async fn all(&self, _admin: &AdminSession) -> Result<Vec<Document>, ServiceError> {
        self.collect(|_| true).await
    }

    pub async fn published(&self) -> Result<Vec<Document>, ServiceError> {
        self.collect(|d| d.published).await
    }

    pub async fn featured(&self) -> Result<Vec<Document>, ServiceError> {
        self.collect(|d| d.published && d.featured).await
    }

    /// Case-insensitive substring search over title, description, tags and category
    ///
    /// A blank query returns every published document.
    pub async fn search(&self, query: &str) -> Result<Vec<Document>, ServiceError> {
        let needle = query.trim().to_lowercase();
        self.collect(|d| d.published && matches_query(d, &needle))
            .await
    }

    pub async fn by_tag(&self, tag: &str) -> Result<Vec<Document>, ServiceError> {
        let tag = tag.trim();
        self.collect(|d| d.published && d.tags().iter().any(|t| t.eq_ignore_ascii_case(tag)))
            .await
    }

    pub async fn by_category(&self, category: &str) -> Result<Vec<Document>, ServiceError> {
        let category = category.trim();
        self.collect(|d| d.published && d.category.eq_ignore_ascii_case(category))
            .await
    }
}

fn matches_query(document: &Document, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    document.title.to_lowercase().contains(needle)
        || document.description.to_lowercase().contains(needle)
        || document.category.to_lowercase().contains(needle)
        || document.tags().iter().any(|t| t.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;
    use crate::services::AdminGate;
    use chrono::{Duration, Utc};

    async fn seeded() -> DocumentCatalogue {
        let store = Arc::new(InMemoryStore::new());
        let base = Utc::now();
        let docs = [
            ("Angular Signals", "frontend", &["Angular"][..], true, true, 3, DocumentKind::Tutorial),
            ("Rust Lifetimes", "backend", &["Rust"][..], true, false, 2, DocumentKind::Tutorial),
            ("Draft Post", "frontend", &["Angular"][..], false, true, 1, DocumentKind::Tutorial),
            ("CORS fix", "backend", &["http"][..], true, false, 0, DocumentKind::Solution),
        ];
        for (title, category, tags, published, featured, age_days, kind) in docs {
            let mut doc = Document::new(kind, title);
            doc.category = category.to_string();
            for tag in tags {
                doc.add_tag(tag);
            }
            doc.published = published;
            doc.featured = featured;
            doc.created_at = base - Duration::days(age_days);
            store.save(doc).await.unwrap();
        }
        DocumentCatalogue::new(store)
    }

    fn titles(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_published_newest_first() {
        let catalogue = seeded().await;
        let docs = catalogue.published().await.unwrap();
        assert_eq!(titles(&docs), vec!["CORS fix", "Rust Lifetimes", "Angular Signals"]);
    }

    #[tokio::test]
    async fn test_featured_excludes_drafts() {
        let catalogue = seeded().await;
        let docs = catalogue.featured().await.unwrap();
        assert_eq!(titles(&docs), vec!["Angular Signals"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let catalogue = seeded().await;
        assert_eq!(titles(&catalogue.search("rust").await.unwrap()), vec!["Rust Lifetimes"]);
        assert_eq!(titles(&catalogue.search("ANGULAR").await.unwrap()), vec!["Angular Signals"]);
        assert_eq!(catalogue.search("  ").await.unwrap().len(), 3);
        assert!(catalogue.search("kubernetes").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_by_tag_and_category() {
        let catalogue = seeded().await;
        assert_eq!(titles(&catalogue.by_tag("angular").await.unwrap()), vec!["Angular Signals"]);
        assert_eq!(
            titles(&catalogue.by_category("Backend").await.unwrap()),
            vec!["CORS fix", "Rust Lifetimes"]
        );
    }

    #[tokio::test]
    async fn test_kind_filter_and_admin_listing() {
        let catalogue = seeded().await.of_kind(DocumentKind::Tutorial);
        assert_eq!(catalogue.published().await.unwrap().len(), 2);

        let admin = AdminGate::new("pw").login("pw").unwrap();
        assert_eq!(catalogue.all(&admin).await.unwrap().len(), 3);
    }
}
