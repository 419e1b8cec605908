use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::content::seed;
use crate::content::slug::SlugCollation;
use crate::db::repository::ArticleRepository;
use crate::error::AppError;
use crate::models::article::Article;

/// File-backed article repository.
///
/// The whole collection lives in one JSON array on disk. Every operation is
/// a full read (or read-modify-write) of that file, serialized behind an
/// async mutex so two writers cannot interleave and lose an update. On
/// first access the file is created from the embedded seed set.
pub struct JsonFileRepository {
    path: PathBuf,
    collation: Arc<dyn SlugCollation>,
    io_lock: Mutex<()>,
    seed_on_init: bool,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>, collation: Arc<dyn SlugCollation>) -> Self {
        Self {
            path: path.into(),
            collation,
            io_lock: Mutex::new(()),
            seed_on_init: true,
        }
    }

    /// A repository that starts from an empty collection instead of the
    /// seed set. Used by tests.
    pub fn empty(path: impl Into<PathBuf>, collation: Arc<dyn SlugCollation>) -> Self {
        Self {
            seed_on_init: false,
            ..Self::new(path, collation)
        }
    }

    /// Create the parent directory and the backing file if missing.
    ///
    /// Callers must hold `io_lock`.
    async fn ensure_storage(&self) -> Result<(), AppError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to create {}: {e}", dir.display())))?;
        }

        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to stat {}: {e}", self.path.display())))?;
        if exists {
            return Ok(());
        }

        let initial = if self.seed_on_init {
            seed::seeded_articles()
        } else {
            Vec::new()
        };
        self.write_articles(&initial).await
    }

    async fn read_articles(&self) -> Result<Vec<Article>, AppError> {
        self.ensure_storage().await?;

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to read {}: {e}", self.path.display())))?;

        serde_json::from_str(&raw)
            .map_err(|e| AppError::Storage(format!("Malformed article store {}: {e}", self.path.display())))
    }

    async fn write_articles(&self, articles: &[Article]) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(articles)
            .map_err(|e| AppError::Internal(format!("Failed to serialize articles: {e}")))?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {e}", self.path.display())))
    }
}

#[async_trait]
impl ArticleRepository for JsonFileRepository {
    async fn list(&self) -> Result<Vec<Article>, AppError> {
        let _guard = self.io_lock.lock().await;
        self.read_articles().await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, AppError> {
        let _guard = self.io_lock.lock().await;
        let articles = self.read_articles().await?;
        Ok(articles
            .into_iter()
            .find(|article| self.collation.eq(&article.slug, slug)))
    }

    async fn insert(&self, article: Article) -> Result<(), AppError> {
        let _guard = self.io_lock.lock().await;
        let mut articles = self.read_articles().await?;
        articles.insert(0, article);
        self.write_articles(&articles).await
    }

    async fn replace(&self, slug: &str, article: Article) -> Result<bool, AppError> {
        let _guard = self.io_lock.lock().await;
        let mut articles = self.read_articles().await?;

        let Some(index) = articles
            .iter()
            .position(|entry| self.collation.eq(&entry.slug, slug))
        else {
            return Ok(false);
        };

        articles[index] = article;
        self.write_articles(&articles).await?;
        Ok(true)
    }

    async fn remove(&self, slug: &str) -> Result<bool, AppError> {
        let _guard = self.io_lock.lock().await;
        let mut articles = self.read_articles().await?;
        let before = articles.len();
        articles.retain(|entry| !self.collation.eq(&entry.slug, slug));

        if articles.len() == before {
            return Ok(false);
        }

        self.write_articles(&articles).await?;
        Ok(true)
    }
}
