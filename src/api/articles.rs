use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::auth::require_service_token;
use crate::error::AppError;
use crate::models::article::{Article, ArticleStatus, CreateArticleInput, UpdateArticleInput};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default, rename = "includeDraft")]
    pub include_draft: bool,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GetQuery {
    #[serde(default, rename = "includeDraft")]
    pub include_draft: bool,
}

/// Create/update request body. Everything is optional at the HTTP edge;
/// the store decides what is required.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticlePayload {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub tags: Option<StringList>,
    pub status: Option<String>,
    pub author: Option<String>,
    pub read_time_minutes: Option<u32>,
}

/// Tags arrive either as a JSON array of strings or as one comma-separated
/// string; anything else is treated as empty.
#[derive(Debug, Clone)]
pub struct StringList(pub Vec<String>);

impl<'de> Deserialize<'de> for StringList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let list = match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            Value::String(s) => s
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };
        Ok(StringList(list))
    }
}

/// Creation coerces anything that is not `published` to draft.
fn parse_create_status(value: Option<&str>) -> ArticleStatus {
    match value {
        Some("published") => ArticleStatus::Published,
        _ => ArticleStatus::Draft,
    }
}

/// Updates only act on recognized values; anything else leaves the stored
/// status alone.
fn parse_update_status(value: Option<&str>) -> Option<ArticleStatus> {
    match value {
        Some("published") => Some(ArticleStatus::Published),
        Some("draft") => Some(ArticleStatus::Draft),
        _ => None,
    }
}

#[derive(Debug, Serialize)]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub article: Article,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

/// `GET /api/articles?includeDraft={bool}&limit={n}`
pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ArticlesResponse>, AppError> {
    let mut articles = if query.include_draft {
        state.articles.list_all().await?
    } else {
        state.articles.list_published().await?
    };

    if let Some(limit) = query.limit {
        articles.truncate(limit);
    }

    Ok(Json(ArticlesResponse { articles }))
}

/// `POST /api/articles`
pub async fn create_article(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ArticlePayload>,
) -> Result<(StatusCode, Json<ArticleResponse>), AppError> {
    require_service_token(&headers, &state.config.service_token)?;

    let input = CreateArticleInput {
        title: payload.title.unwrap_or_default(),
        excerpt: payload.excerpt.unwrap_or_default(),
        body: payload.body.unwrap_or_default(),
        tags: payload.tags.map(|tags| tags.0).unwrap_or_default(),
        status: parse_create_status(payload.status.as_deref()),
        author: payload.author,
        read_time_minutes: payload.read_time_minutes,
    };

    let article = state.articles.create(input).await?;
    Ok((StatusCode::CREATED, Json(ArticleResponse { article })))
}

/// `GET /api/articles/{slug}?includeDraft={bool}`
pub async fn get_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<GetQuery>,
) -> Result<Json<ArticleResponse>, AppError> {
    let article = state
        .articles
        .get_by_slug(&slug, query.include_draft)
        .await?
        .ok_or_else(|| AppError::NotFound("Article not found".into()))?;

    Ok(Json(ArticleResponse { article }))
}

/// `PATCH /api/articles/{slug}`
pub async fn update_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<ArticlePayload>,
) -> Result<Json<ArticleResponse>, AppError> {
    require_service_token(&headers, &state.config.service_token)?;

    let input = UpdateArticleInput {
        title: payload.title,
        excerpt: payload.excerpt,
        body: payload.body,
        tags: payload.tags.map(|tags| tags.0),
        status: parse_update_status(payload.status.as_deref()),
        author: payload.author,
        read_time_minutes: payload.read_time_minutes,
    };

    let article = state
        .articles
        .update(&slug, input)
        .await?
        .ok_or_else(|| AppError::NotFound("Article not found".into()))?;

    Ok(Json(ArticleResponse { article }))
}

/// `DELETE /api/articles/{slug}`
pub async fn delete_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeleteResponse>, AppError> {
    require_service_token(&headers, &state.config.service_token)?;

    if !state.articles.delete(&slug).await? {
        return Err(AppError::NotFound("Article not found".into()));
    }

    Ok(Json(DeleteResponse { ok: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_list_accepts_array_and_comma_string() {
        let from_array: StringList =
            serde_json::from_value(serde_json::json!(["a", 1, "b"])).unwrap();
        assert_eq!(from_array.0, vec!["a", "b"]);

        let from_string: StringList =
            serde_json::from_value(serde_json::json!("Grounding, Anxiety , ,Sleep")).unwrap();
        assert_eq!(from_string.0, vec!["Grounding", "Anxiety", "Sleep"]);

        let from_other: StringList = serde_json::from_value(serde_json::json!(42)).unwrap();
        assert!(from_other.0.is_empty());
    }

    #[test]
    fn create_status_coerces_unknown_values_to_draft() {
        assert_eq!(parse_create_status(Some("published")), ArticleStatus::Published);
        assert_eq!(parse_create_status(Some("archived")), ArticleStatus::Draft);
        assert_eq!(parse_create_status(None), ArticleStatus::Draft);
    }

    #[test]
    fn update_status_ignores_unknown_values() {
        assert_eq!(parse_update_status(Some("draft")), Some(ArticleStatus::Draft));
        assert_eq!(
            parse_update_status(Some("published")),
            Some(ArticleStatus::Published)
        );
        assert_eq!(parse_update_status(Some("archived")), None);
        assert_eq!(parse_update_status(None), None);
    }
}
