use std::sync::Arc;

use crate::chat::session::SessionStore;
use crate::config::AppConfig;
use crate::content::store::ArticleStore;

/// Shared handles passed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<ArticleStore>,
    pub chat: Arc<SessionStore>,
    pub config: Arc<AppConfig>,
}
