use std::cmp::Reverse;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::content::normalize::{
    estimate_read_time_minutes, normalize_multiline, normalize_tags, safe_trim,
};
use crate::content::slug::{slugify, unique_slug, SlugCollation};
use crate::db::repository::ArticleRepository;
use crate::error::AppError;
use crate::models::article::{Article, ArticleStatus, CreateArticleInput, UpdateArticleInput};

/// Author stamped on articles created without one.
pub const DEFAULT_AUTHOR: &str = "Admin CurhatIn";

/// Sole authority for article lifecycle rules: slug assignment, field
/// normalization, read-time estimation and publish stamping.
///
/// Persistence is delegated to the injected repository. Each mutation spans
/// several repository calls (list, then insert; find, then replace), so a
/// store-level mutex makes the whole window atomic within the process.
pub struct ArticleStore {
    repo: Arc<dyn ArticleRepository>,
    collation: Arc<dyn SlugCollation>,
    write_lock: Mutex<()>,
}

impl ArticleStore {
    pub fn new(repo: Arc<dyn ArticleRepository>, collation: Arc<dyn SlugCollation>) -> Self {
        Self {
            repo,
            collation,
            write_lock: Mutex::new(()),
        }
    }

    /// All articles, drafts included, most recently published-or-updated
    /// first.
    pub async fn list_all(&self) -> Result<Vec<Article>, AppError> {
        let mut articles = self.repo.list().await?;
        sort_by_latest(&mut articles);
        Ok(articles)
    }

    /// Published articles only, same ordering as [`Self::list_all`].
    pub async fn list_published(&self) -> Result<Vec<Article>, AppError> {
        let mut articles = self.repo.list().await?;
        articles.retain(|article| article.status == ArticleStatus::Published);
        sort_by_latest(&mut articles);
        Ok(articles)
    }

    /// Look up one article. When `include_draft` is false a draft match is
    /// reported as absent; this is the access boundary for public reads.
    pub async fn get_by_slug(
        &self,
        slug: &str,
        include_draft: bool,
    ) -> Result<Option<Article>, AppError> {
        let Some(article) = self.repo.find_by_slug(slug).await? else {
            return Ok(None);
        };

        if !include_draft && article.status != ArticleStatus::Published {
            return Ok(None);
        }

        Ok(Some(article))
    }

    /// Create an article. Fails with a validation error when title, excerpt
    /// or body is blank after normalization.
    pub async fn create(&self, input: CreateArticleInput) -> Result<Article, AppError> {
        let title = safe_trim(&input.title);
        let excerpt = safe_trim(&input.excerpt);
        let body = normalize_multiline(&input.body);

        if title.is_empty() {
            return Err(AppError::BadRequest("title is required".into()));
        }
        if excerpt.is_empty() {
            return Err(AppError::BadRequest("excerpt is required".into()));
        }
        if body.is_empty() {
            return Err(AppError::BadRequest("body is required".into()));
        }

        let _guard = self.write_lock.lock().await;
        let existing = self.repo.list().await?;
        let now = Utc::now();

        let author = input
            .author
            .as_deref()
            .map(safe_trim)
            .filter(|author| !author.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

        let article = Article {
            id: Uuid::new_v4().to_string(),
            slug: unique_slug(&slugify(&title), &existing, self.collation.as_ref()),
            read_time_minutes: input
                .read_time_minutes
                .unwrap_or_else(|| estimate_read_time_minutes(&body))
                .max(1),
            title,
            excerpt,
            body,
            tags: normalize_tags(&input.tags),
            status: input.status,
            author,
            created_at: now,
            updated_at: now,
            published_at: (input.status == ArticleStatus::Published).then_some(now),
        };

        self.repo.insert(article.clone()).await?;
        Ok(article)
    }

    /// Merge the supplied fields into the article matching `slug`.
    ///
    /// Returns `None` when the slug is unknown. `published_at` is stamped
    /// only on the first transition into published and cleared whenever the
    /// resulting status is not published.
    pub async fn update(
        &self,
        slug: &str,
        input: UpdateArticleInput,
    ) -> Result<Option<Article>, AppError> {
        let _guard = self.write_lock.lock().await;

        let Some(current) = self.repo.find_by_slug(slug).await? else {
            return Ok(None);
        };
        let now = Utc::now();

        let next_status = input.status.unwrap_or(current.status);
        let next_body = input
            .body
            .as_deref()
            .map(normalize_multiline)
            .filter(|body| !body.is_empty())
            .unwrap_or_else(|| current.body.clone());
        let body_changed = next_body != current.body;

        let read_time_minutes = match input.read_time_minutes {
            Some(minutes) => minutes.max(1),
            None if body_changed => estimate_read_time_minutes(&next_body),
            None => current.read_time_minutes,
        };

        let published_at = if next_status == ArticleStatus::Published {
            current.published_at.or(Some(now))
        } else {
            None
        };

        let updated = Article {
            id: current.id.clone(),
            slug: current.slug.clone(),
            title: input
                .title
                .as_deref()
                .map(safe_trim)
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| current.title.clone()),
            excerpt: input
                .excerpt
                .as_deref()
                .map(safe_trim)
                .filter(|excerpt| !excerpt.is_empty())
                .unwrap_or_else(|| current.excerpt.clone()),
            body: next_body,
            tags: input
                .tags
                .as_deref()
                .map(normalize_tags)
                .unwrap_or_else(|| current.tags.clone()),
            status: next_status,
            author: input
                .author
                .as_deref()
                .map(safe_trim)
                .filter(|author| !author.is_empty())
                .unwrap_or_else(|| current.author.clone()),
            read_time_minutes,
            created_at: current.created_at,
            updated_at: now,
            published_at,
        };

        if !self.repo.replace(slug, updated.clone()).await? {
            return Ok(None);
        }
        Ok(Some(updated))
    }

    /// Remove the article matching `slug`. Returns whether a record was
    /// actually removed.
    pub async fn delete(&self, slug: &str) -> Result<bool, AppError> {
        let _guard = self.write_lock.lock().await;
        self.repo.remove(slug).await
    }
}

fn sort_by_latest(articles: &mut [Article]) {
    articles.sort_by_key(|article| Reverse(article.published_at.unwrap_or(article.updated_at)));
}
