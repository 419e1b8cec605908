use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::session::ThreadKey;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub share_anonymously: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub thread_id: String,
}

/// `POST /api/chat`: append the message to a thread (opening one when no
/// `thread_id` is given) and proxy it to the completion endpoint.
pub async fn send_chat_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let key = ThreadKey::from_user_id(request.user_id.as_deref());

    let thread_id = match request.thread_id {
        Some(id) => id,
        None => {
            state
                .chat
                .open_thread(&key, request.category.as_deref().unwrap_or_default())
                .await
                .id
        }
    };

    match state
        .chat
        .send_message(&key, &thread_id, &request.message, request.share_anonymously)
        .await
    {
        Ok(response) => Ok(Json(ChatResponse {
            response,
            thread_id,
        })),
        // The unsent text is already in the caller's hands; surface the
        // failure itself.
        Err(failure) => Err(failure.error),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ThreadsQuery {
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    pub updated_at: DateTime<Utc>,
    pub message_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ThreadsResponse {
    pub threads: Vec<ThreadSummary>,
}

/// `GET /api/chat/threads?userId={id}`: thread summaries for one bucket,
/// most recently updated first.
pub async fn list_threads(
    State(state): State<AppState>,
    Query(query): Query<ThreadsQuery>,
) -> Json<ThreadsResponse> {
    let key = ThreadKey::from_user_id(query.user_id.as_deref());

    let threads = state
        .chat
        .list_threads(&key)
        .await
        .into_iter()
        .map(|thread| ThreadSummary {
            id: thread.id,
            title: thread.title,
            category: thread.category,
            updated_at: thread.updated_at,
            message_count: thread.messages.len(),
        })
        .collect();

    Json(ThreadsResponse { threads })
}
