use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::api;
use crate::state::AppState;

/// Build the API router.
///
/// Kept separate from `main` so integration tests can mount the exact same
/// routes on a test server.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/articles",
            get(api::articles::list_articles).post(api::articles::create_article),
        )
        .route(
            "/api/articles/{slug}",
            get(api::articles::get_article)
                .patch(api::articles::update_article)
                .delete(api::articles::delete_article),
        )
        .route("/api/chat", post(api::chat::send_chat_message))
        .route("/api/chat/threads", get(api::chat::list_threads))
        .layer(middleware::from_fn(api::cors::cors_middleware))
        .with_state(state)
}
