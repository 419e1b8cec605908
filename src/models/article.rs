use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication lifecycle state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    #[default]
    Draft,
    Published,
}

/// A wellness article as persisted and served over the API.
///
/// `slug` is derived from the title at creation and never changes afterward,
/// even when the title is edited. `published_at` is stamped the first time
/// the article becomes published, kept across edits while still published,
/// and cleared whenever the article is not published.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Opaque unique identifier, fixed at creation.
    pub id: String,
    /// URL-safe unique identifier, fixed at creation.
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Multi-paragraph text, normalized to Unix line endings.
    pub body: String,
    /// Deduplicated labels in first-occurrence order.
    pub tags: Vec<String>,
    pub status: ArticleStatus,
    pub author: String,
    /// Always at least one minute.
    pub read_time_minutes: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Input for creating an article.
///
/// `title`, `excerpt` and `body` must be non-empty after normalization.
#[derive(Debug, Clone, Default)]
pub struct CreateArticleInput {
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub tags: Vec<String>,
    pub status: ArticleStatus,
    pub author: Option<String>,
    pub read_time_minutes: Option<u32>,
}

/// Partial update. Absent (or blank, for the text fields) values keep what
/// is stored; the slug is never recomputed.
#[derive(Debug, Clone, Default)]
pub struct UpdateArticleInput {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<ArticleStatus>,
    pub author: Option<String>,
    pub read_time_minutes: Option<u32>,
}
