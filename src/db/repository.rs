use async_trait::async_trait;

use crate::error::AppError;
use crate::models::article::Article;

/// Repository trait for article persistence.
///
/// Lifecycle rules live in [`crate::content::store::ArticleStore`]; this
/// trait only moves records in and out of the backing store, so storage can
/// be swapped (and mocked in tests) without touching business rules. Slug
/// matching uses the repository's injected collation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// All articles in stored order (newest insertions first).
    async fn list(&self) -> Result<Vec<Article>, AppError>;

    /// Find an article by slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, AppError>;

    /// Prepend a new article to the collection.
    async fn insert(&self, article: Article) -> Result<(), AppError>;

    /// Replace the article matching `slug` in place. Returns `false` when
    /// no article matches.
    async fn replace(&self, slug: &str, article: Article) -> Result<bool, AppError>;

    /// Remove the article matching `slug`. Returns `false` when no article
    /// matches.
    async fn remove(&self, slug: &str) -> Result<bool, AppError>;
}
