use std::sync::Arc;
use tracing::instrument;

use crate::articles::domain::Article;
use crate::articles::store::ArticleStore;
use crate::errors::ServiceError;

/// Service over a store chosen at runtime.
pub type DynArticleService = ArticleService<dyn ArticleStore>;

/// Application service for articles.
///
/// Forwards every call to the configured store and returns its result
/// unchanged. HTTP handlers depend on this type rather than on a concrete
/// store, which keeps the backend a startup decision.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use service::articles::{Article, ArticleService, InMemoryArticleStore};
///
/// let svc = ArticleService::new(Arc::new(InMemoryArticleStore::new()));
/// let stored = tokio_test::block_on(svc.add(Article {
///     title: "T".into(),
///     description: "D".into(),
///     ..Default::default()
/// }))
/// .unwrap();
/// assert_eq!(stored.id, 1);
/// assert_eq!(tokio_test::block_on(svc.list()).unwrap().len(), 1);
/// ```
pub struct ArticleService<R: ArticleStore + ?Sized> {
    repo: Arc<R>,
}

impl<R: ArticleStore + ?Sized> Clone for ArticleService<R> {
    fn clone(&self) -> Self {
        Self { repo: Arc::clone(&self.repo) }
    }
}

impl<R: ArticleStore + ?Sized> ArticleService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Article>, ServiceError> {
        self.repo.list().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<Article>, ServiceError> {
        self.repo.get(id).await
    }

    #[instrument(skip(self, article), fields(path = %article.path))]
    pub async fn add(&self, article: Article) -> Result<Article, ServiceError> {
        self.repo.add(article).await
    }

    /// `Ok(false)` when no article has `article.id`.
    #[instrument(skip(self, article), fields(id = article.id))]
    pub async fn update(&self, article: Article) -> Result<bool, ServiceError> {
        self.repo.update(article).await
    }

    /// `Ok(false)` when no article has `id`.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        self.repo.delete(id).await
    }
}
