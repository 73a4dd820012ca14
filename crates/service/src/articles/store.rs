use async_trait::async_trait;

use crate::articles::domain::Article;
use crate::errors::ServiceError;

pub mod memory;
pub mod seaorm;

/// Storage contract for articles.
///
/// Mutations on an id that does not exist are silent no-ops: `update` and
/// `delete` return `Ok(false)` instead of an error, and callers decide
/// whether that is worth reporting.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// All articles, ordered by id.
    async fn list(&self) -> Result<Vec<Article>, ServiceError>;

    async fn get(&self, id: i32) -> Result<Option<Article>, ServiceError>;

    /// Persist a new article. The incoming `id` is ignored; the returned copy
    /// carries the id assigned by the store.
    async fn add(&self, article: Article) -> Result<Article, ServiceError>;

    /// Overwrite every field except `id` of the article with `article.id`.
    /// Returns whether a stored article matched.
    async fn update(&self, article: Article) -> Result<bool, ServiceError>;

    /// Remove the article with `id`. Returns whether one was removed.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}
