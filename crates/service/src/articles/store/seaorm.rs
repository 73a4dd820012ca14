use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use tracing::{debug, info};

use super::ArticleStore;
use crate::articles::domain::Article;
use crate::errors::ServiceError;
use models::article;

/// Article store backed by the `article` table. Every call is a single
/// statement committed on its own.
pub struct SeaOrmArticleStore {
    pub db: DatabaseConnection,
}

impl SeaOrmArticleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Column values for every field except the primary key.
fn active_model(article: Article) -> article::ActiveModel {
    article::ActiveModel {
        id: NotSet,
        title: Set(article.title),
        short_description: Set(article.short_description),
        description: Set(article.description),
        category: Set(article.category),
        source: Set(article.source),
        path: Set(article.path),
        published_date: Set(article.published_date),
        author: Set(article.author),
        image_url: Set(article.image_url),
    }
}

fn map_db_err(e: DbErr) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            ServiceError::Conflict(format!("article path already exists ({detail})"))
        }
        _ => ServiceError::Db(e.to_string()),
    }
}

#[async_trait]
impl ArticleStore for SeaOrmArticleStore {
    async fn list(&self) -> Result<Vec<Article>, ServiceError> {
        let rows = article::Entity::find()
            .order_by_asc(article::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(Article::from).collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Article>, ServiceError> {
        let found = article::Entity::find_by_id(id).one(&self.db).await.map_err(map_db_err)?;
        Ok(found.map(Article::from))
    }

    async fn add(&self, article: Article) -> Result<Article, ServiceError> {
        models::article::validate_title(&article.title)?;
        let created = active_model(article).insert(&self.db).await.map_err(map_db_err)?;
        info!(id = created.id, path = %created.path, "article_inserted");
        Ok(Article::from(created))
    }

    async fn update(&self, article: Article) -> Result<bool, ServiceError> {
        models::article::validate_title(&article.title)?;
        let id = article.id;
        let res = article::Entity::update_many()
            .set(active_model(article))
            .filter(article::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        debug!(id, rows_affected = res.rows_affected, "article_updated");
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = article::Entity::delete_by_id(id).exec(&self.db).await.map_err(map_db_err)?;
        debug!(id, rows_affected = res.rows_affected, "article_deleted");
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use chrono::{TimeZone, Utc};

    fn article(title: &str, path: &str) -> Article {
        Article {
            title: title.into(),
            short_description: "short".into(),
            description: "body".into(),
            category: "World".into(),
            source: "Wire".into(),
            path: path.into(),
            published_date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            author: "Lee".into(),
            image_url: "https://example.com/x.jpg".into(),
            ..Default::default()
        }
    }

    async fn store() -> Result<SeaOrmArticleStore, anyhow::Error> {
        Ok(SeaOrmArticleStore::new(get_db().await?))
    }

    #[tokio::test]
    async fn add_list_delete_scenario() -> Result<(), anyhow::Error> {
        let store = store().await?;

        let a = store.add(article("T", "a")).await?;
        assert_eq!(a.id, 1);
        assert!(store.list().await?.iter().any(|x| x.id == a.id));

        let b = store.add(article("T2", "b")).await?;
        assert_eq!(b.id, 2);

        assert!(store.delete(a.id).await?);
        assert_eq!(store.list().await?, vec![b]);
        Ok(())
    }

    #[tokio::test]
    async fn get_round_trips_all_fields() -> Result<(), anyhow::Error> {
        let store = store().await?;
        let input = article("Markets rally", "markets-rally");

        let stored = store.add(Article { id: 77, ..input.clone() }).await?;
        assert_ne!(stored.id, 0);

        let fetched = store.get(stored.id).await?.expect("row");
        assert_eq!(fetched, Article { id: stored.id, ..input });
        Ok(())
    }

    #[tokio::test]
    async fn update_overwrites_row() -> Result<(), anyhow::Error> {
        let store = store().await?;
        let stored = store.add(article("Old", "old")).await?;

        let replacement = Article {
            id: stored.id,
            title: "New".into(),
            path: "new".into(),
            author: "Sam".into(),
            ..article("ignored", "ignored")
        };
        assert!(store.update(replacement.clone()).await?);
        assert_eq!(store.get(stored.id).await?, Some(replacement));
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_noops() -> Result<(), anyhow::Error> {
        let store = store().await?;
        store.add(article("Kept", "kept")).await?;

        assert!(!store.update(Article { id: 404, ..article("Ghost", "ghost") }).await?);
        assert!(!store.delete(404).await?);
        assert!(store.get(404).await?.is_none());
        assert_eq!(store.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_path_is_a_conflict() -> Result<(), anyhow::Error> {
        let store = store().await?;
        store.add(article("One", "dup")).await?;

        let err = store.add(article("Two", "dup")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)), "got {err:?}");

        let other = store.add(article("Three", "other")).await?;
        let err = store.update(Article { id: other.id, ..article("Three", "dup") }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)), "got {err:?}");

        assert_eq!(store.list().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_title_never_reaches_the_table() -> Result<(), anyhow::Error> {
        let store = store().await?;
        let err = store.add(article(&"x".repeat(300), "long")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
        assert!(store.list().await?.is_empty());
        Ok(())
    }
}
