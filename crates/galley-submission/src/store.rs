//! Content-store boundary.
//!
//! The production store is an external service; this module defines the
//! trait the aggregator talks to, plus an in-memory implementation used by
//! tests and local runs. Unique-constraint violations surface as a
//! recognizable error kind so the aggregator can map them to the
//! `title_conflict` field error.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use galley_core::models::Article;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Unique constraint violation: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store rejected record: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Insert a new article record, returning its id.
    async fn insert(&self, article: Article) -> Result<Uuid, StoreError>;

    /// Fetch an article by id.
    async fn get(&self, id: Uuid) -> Result<Option<Article>, StoreError>;
}

/// In-memory article store with a raw (exact-match) unique title constraint,
/// mirroring the store-side uniqueness rule. No normalization is applied to
/// titles before comparison.
#[derive(Clone, Default)]
pub struct MemoryArticleStore {
    articles: Arc<Mutex<HashMap<Uuid, Article>>>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.articles.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn insert(&self, article: Article) -> Result<Uuid, StoreError> {
        let mut articles = self.articles.lock().unwrap();
        if articles.values().any(|a| a.title == article.title) {
            return Err(StoreError::UniqueViolation {
                constraint: "articles_title_key".to_string(),
            });
        }
        let id = article.id;
        articles.insert(id, article);
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Article>, StoreError> {
        Ok(self.articles.lock().unwrap().get(&id).cloned())
    }
}
