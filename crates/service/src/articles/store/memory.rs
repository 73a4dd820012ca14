use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use super::ArticleStore;
use crate::articles::domain::Article;
use crate::errors::ServiceError;

#[derive(Debug)]
struct State {
    articles: Vec<Article>,
    next_id: i32,
}

impl State {
    fn push(&mut self, mut article: Article) -> Result<Article, ServiceError> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| ServiceError::Db("article id space exhausted".into()))?;
        article.id = id;
        self.articles.push(article.clone());
        Ok(article)
    }
}

/// Process-local article store.
///
/// The list and the id counter sit behind one lock, so `add`, `update` and
/// `delete` are atomic with respect to each other. Ids start at 1 and are
/// never reused. `path` uniqueness is not enforced here.
#[derive(Debug)]
pub struct InMemoryArticleStore {
    state: RwLock<State>,
}

impl Default for InMemoryArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self { state: RwLock::new(State { articles: Vec::new(), next_id: 1 }) }
    }

    /// Store pre-populated with two demo articles (ids 1 and 2).
    pub fn with_samples() -> Self {
        let now = Utc::now();
        let samples = [
            Article {
                title: "AI is reshaping industry".into(),
                short_description: "Artificial intelligence is changing several sectors of the economy.".into(),
                description: "A recent report shows how AI is driving innovation across manufacturing, finance and logistics.".into(),
                category: "Technology".into(),
                source: "TechNews".into(),
                path: "ai-reshaping-industry".into(),
                published_date: now - Duration::days(5),
                author: "Juan Perez".into(),
                image_url: "https://example.com/ai-news.jpg".into(),
                ..Default::default()
            },
            Article {
                title: "Tourism hits a record high".into(),
                short_description: "National tourism reaches historic numbers.".into(),
                description: "Figures for the last quarter show unprecedented growth in visitor arrivals.".into(),
                category: "Economy".into(),
                source: "EcoData".into(),
                path: "tourism-record-high".into(),
                published_date: now - Duration::days(2),
                author: "Maria Lopez".into(),
                image_url: "https://example.com/tourism-news.jpg".into(),
                ..Default::default()
            },
        ];

        let mut state = State { articles: Vec::with_capacity(samples.len()), next_id: 1 };
        for article in samples {
            // two items cannot exhaust the counter
            let _ = state.push(article);
        }
        Self { state: RwLock::new(state) }
    }
}

#[async_trait]
impl ArticleStore for InMemoryArticleStore {
    async fn list(&self) -> Result<Vec<Article>, ServiceError> {
        let state = self.state.read().await;
        Ok(state.articles.clone())
    }

    async fn get(&self, id: i32) -> Result<Option<Article>, ServiceError> {
        let state = self.state.read().await;
        Ok(state.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn add(&self, article: Article) -> Result<Article, ServiceError> {
        models::article::validate_title(&article.title)?;
        let mut state = self.state.write().await;
        let stored = state.push(article)?;
        debug!(id = stored.id, path = %stored.path, "memory_article_added");
        Ok(stored)
    }

    async fn update(&self, article: Article) -> Result<bool, ServiceError> {
        models::article::validate_title(&article.title)?;
        let mut state = self.state.write().await;
        let Some(existing) = state.articles.iter_mut().find(|a| a.id == article.id) else {
            debug!(id = article.id, "memory_article_update_missing");
            return Ok(false);
        };
        *existing = Article { id: existing.id, ..article };
        Ok(true)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let mut state = self.state.write().await;
        let before = state.articles.len();
        state.articles.retain(|a| a.id != id);
        Ok(state.articles.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn article(title: &str, description: &str) -> Article {
        Article { title: title.into(), description: description.into(), ..Default::default() }
    }

    #[tokio::test]
    async fn add_list_delete_scenario() -> Result<(), ServiceError> {
        let store = InMemoryArticleStore::new();

        let a = store.add(article("T", "D")).await?;
        assert_eq!(a.id, 1);
        assert!(store.list().await?.iter().any(|x| x.id == 1));

        let b = store.add(article("T2", "D2")).await?;
        assert_eq!(b.id, 2);

        assert!(store.delete(1).await?);
        let remaining = store.list().await?;
        assert_eq!(remaining, vec![b]);
        Ok(())
    }

    #[tokio::test]
    async fn get_returns_input_with_assigned_id() -> Result<(), ServiceError> {
        let store = InMemoryArticleStore::new();
        let input = Article {
            id: 42,
            title: "Elections".into(),
            short_description: "Short".into(),
            description: "Long".into(),
            category: "Politics".into(),
            source: "Daily".into(),
            path: "elections".into(),
            author: "Kim".into(),
            image_url: "https://example.com/e.png".into(),
            ..Default::default()
        };

        let stored = store.add(input.clone()).await?;
        assert_eq!(stored.id, 1, "client-supplied id is ignored");

        let fetched = store.get(stored.id).await?.expect("stored article");
        assert_eq!(fetched, Article { id: 1, ..input });
        Ok(())
    }

    #[tokio::test]
    async fn update_overwrites_everything_but_id() -> Result<(), ServiceError> {
        let store = InMemoryArticleStore::new();
        let stored = store.add(article("Old", "old body")).await?;

        let replacement = Article {
            id: stored.id,
            title: "New".into(),
            description: "new body".into(),
            path: "new-path".into(),
            published_date: stored.published_date - Duration::days(1),
            ..Default::default()
        };
        assert!(store.update(replacement.clone()).await?);
        assert_eq!(store.get(stored.id).await?, Some(replacement));
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_noops() -> Result<(), ServiceError> {
        let store = InMemoryArticleStore::new();
        store.add(article("Kept", "body")).await?;

        assert!(!store.update(Article { id: 99, ..article("Ghost", "x") }).await?);
        assert!(!store.delete(99).await?);
        assert!(store.get(99).await?.is_none());
        assert_eq!(store.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() -> Result<(), ServiceError> {
        let store = InMemoryArticleStore::new();
        let a = store.add(article("A", "a")).await?;
        store.delete(a.id).await?;
        let b = store.add(article("B", "b")).await?;
        assert_eq!(b.id, 2);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_path_is_accepted() -> Result<(), ServiceError> {
        let store = InMemoryArticleStore::new();
        store.add(Article { path: "dup".into(), ..article("One", "1") }).await?;
        store.add(Article { path: "dup".into(), ..article("Two", "2") }).await?;
        assert_eq!(store.list().await?.iter().filter(|a| a.path == "dup").count(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_title_is_rejected() {
        let store = InMemoryArticleStore::new();
        let err = store.add(article(" ", "d")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));

        let stored = store.add(article("ok", "d")).await.unwrap();
        let too_long = Article { id: stored.id, ..article(&"x".repeat(251), "d") };
        assert!(store.update(too_long).await.is_err());
        assert_eq!(store.get(stored.id).await.unwrap().unwrap().title, "ok");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn samples_are_seeded_with_first_ids() -> Result<(), ServiceError> {
        let store = InMemoryArticleStore::with_samples();
        let list = store.list().await?;
        assert_eq!(list.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(list.iter().all(|a| a.published_date < Utc::now()));

        let next = store.add(article("Third", "d")).await?;
        assert_eq!(next.id, 3);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_adds_get_distinct_ids() -> Result<(), ServiceError> {
        let store = Arc::new(InMemoryArticleStore::new());
        let mut handles = Vec::new();
        for i in 0..64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.add(article(&format!("title {i}"), "body")).await
            }));
        }

        let mut ids = HashSet::new();
        for h in handles {
            let stored = h.await.expect("task")?;
            assert!(ids.insert(stored.id), "id {} handed out twice", stored.id);
        }
        assert_eq!(ids, (1..=64).collect::<HashSet<i32>>());
        assert_eq!(store.list().await?.len(), 64);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_and_deletes_leave_consistent_state() -> Result<(), ServiceError> {
        let store = Arc::new(InMemoryArticleStore::new());
        for i in 0..32 {
            store.add(article(&format!("t{i}"), "body")).await?;
        }

        let mut handles = Vec::new();
        for id in 1..=32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                if id % 2 == 0 {
                    store.delete(id).await
                } else {
                    store.update(Article { id, ..article("updated", "body") }).await
                }
            }));
        }
        for h in handles {
            assert!(h.await.expect("task")?);
        }

        let list = store.list().await?;
        assert_eq!(list.len(), 16);
        assert!(list.iter().all(|a| a.id % 2 == 1 && a.title == "updated"));
        Ok(())
    }

    #[tokio::test]
    async fn exhausted_id_counter_is_a_storage_error() {
        let store = InMemoryArticleStore {
            state: RwLock::new(State { articles: Vec::new(), next_id: i32::MAX }),
        };
        let err = store.add(article("t", "d")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)), "got {err:?}");
        assert!(store.list().await.unwrap().is_empty());
    }
}
