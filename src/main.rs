use std::sync::Arc;

use tower_http::trace::TraceLayer;

use curhatin_content::app;
use curhatin_content::chat::client::HttpChatClient;
use curhatin_content::chat::session::SessionStore;
use curhatin_content::config::AppConfig;
use curhatin_content::content::slug::{BaseCollation, SlugCollation};
use curhatin_content::content::store::ArticleStore;
use curhatin_content::db::json_store::JsonFileRepository;
use curhatin_content::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "curhatin_content=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting CurhatIn content service...");

    let config = Arc::new(AppConfig::from_env()?);

    let collation: Arc<dyn SlugCollation> = Arc::new(BaseCollation);
    let repo = Arc::new(JsonFileRepository::new(
        config.data_file.clone(),
        collation.clone(),
    ));
    let articles = Arc::new(ArticleStore::new(repo, collation));

    tracing::info!("Article store backed by {}", config.data_file.display());

    let chat_client = Arc::new(HttpChatClient::new(config.chat_endpoint.clone()));
    let chat = Arc::new(SessionStore::new(chat_client));

    tracing::info!("Chat messages proxied to {}", config.chat_endpoint);

    let state = AppState {
        articles,
        chat,
        config: config.clone(),
    };

    let router = app::router(state).layer(TraceLayer::new_for_http());

    tracing::info!("Listening on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}
