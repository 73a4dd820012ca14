use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news article as seen by the service and HTTP layers.
///
/// `id == 0` means the article has not been stored yet; stores assign the
/// real id in `add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub category: String,
    pub source: String,
    /// Unique slug used in public URLs.
    pub path: String,
    pub published_date: DateTime<Utc>,
    pub author: String,
    pub image_url: String,
}

impl Default for Article {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            short_description: String::new(),
            description: String::new(),
            category: String::new(),
            source: String::new(),
            path: String::new(),
            published_date: Utc::now(),
            author: String::new(),
            image_url: String::new(),
        }
    }
}

impl From<models::article::Model> for Article {
    fn from(m: models::article::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            short_description: m.short_description,
            description: m.description,
            category: m.category,
            source: m.source,
            path: m.path,
            published_date: m.published_date,
            author: m.author,
            image_url: m.image_url,
        }
    }
}
