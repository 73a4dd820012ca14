use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::routes::articles::ArticleInput;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Response shape of an article.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDoc {
    pub id: i32,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub category: String,
    pub source: String,
    pub path: String,
    pub published_date: DateTime<Utc>,
    pub author: String,
    pub image_url: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::articles::list,
        crate::routes::articles::get,
        crate::routes::articles::create,
        crate::routes::articles::update,
        crate::routes::articles::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ArticleDoc,
            ArticleInput,
        )
    ),
    tags(
        (name = "health"),
        (name = "articles")
    )
)]
pub struct ApiDoc;
