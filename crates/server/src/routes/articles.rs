use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use service::articles::Article;
use tracing::info;
use utoipa::ToSchema;

use crate::{errors::JsonApiError, routes::ServerState};

/// Request body for create and replace. Omitted strings default to empty.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleInput {
    /// Ignored on create; must match the URL on update.
    pub id: i32,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub category: String,
    pub source: String,
    pub path: String,
    /// Ignored on create. On update, the stored date is kept when omitted.
    pub published_date: Option<DateTime<Utc>>,
    pub author: String,
    pub image_url: String,
}

impl ArticleInput {
    fn missing_required(&self) -> bool {
        self.title.trim().is_empty() || self.description.trim().is_empty()
    }

    fn into_article(self, id: i32, published_date: DateTime<Utc>) -> Article {
        Article {
            id,
            title: self.title,
            short_description: self.short_description,
            description: self.description,
            category: self.category,
            source: self.source,
            path: self.path,
            published_date,
            author: self.author,
            image_url: self.image_url,
        }
    }
}

/// Ids that are not a valid `i32` name no article.
fn parse_id(raw: &str) -> Result<i32, JsonApiError> {
    raw.parse().map_err(|_| JsonApiError::not_found())
}

#[utoipa::path(
    get, path = "/articles", tag = "articles",
    responses(
        (status = 200, description = "All articles", body = [crate::openapi::ArticleDoc])
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Article>>, JsonApiError> {
    let articles = state.articles.list().await?;
    info!(count = articles.len(), "list articles");
    Ok(Json(articles))
}

#[utoipa::path(
    get, path = "/articles/{id}", tag = "articles",
    params(("id" = i32, Path, description = "Article id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ArticleDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Article>, JsonApiError> {
    let id = parse_id(&id)?;
    state.articles.get(id).await?.map(Json).ok_or_else(JsonApiError::not_found)
}

#[utoipa::path(
    post, path = "/articles", tag = "articles",
    request_body = ArticleInput,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ArticleDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Path already in use")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ArticleInput>, JsonRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let Json(input) = payload?;
    if input.missing_required() {
        return Err(JsonApiError::bad_request("title and description must not be empty"));
    }

    // id and publication date are always assigned server-side
    let created = state.articles.add(input.into_article(0, Utc::now())).await?;
    info!(id = created.id, path = %created.path, "created article");

    let location = format!("/articles/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    put, path = "/articles/{id}", tag = "articles",
    params(("id" = i32, Path, description = "Article id")),
    request_body = ArticleInput,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Path already in use")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<ArticleInput>, JsonRejection>,
) -> Result<StatusCode, JsonApiError> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;
    if input.id != id {
        return Err(JsonApiError::bad_request("id in the URL does not match the id in the body"));
    }

    let existing = state.articles.get(id).await?.ok_or_else(JsonApiError::not_found)?;

    if input.missing_required() {
        return Err(JsonApiError::bad_request("title and description must not be empty"));
    }

    let published_date = input.published_date.unwrap_or(existing.published_date);
    if !state.articles.update(input.into_article(id, published_date)).await? {
        // removed between the lookup and the write
        return Err(JsonApiError::not_found());
    }
    info!(id, "updated article");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/articles/{id}", tag = "articles",
    params(("id" = i32, Path, description = "Article id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = parse_id(&id)?;
    if state.articles.delete(id).await? {
        info!(id, "deleted article");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found())
    }
}
