use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chat::session::ChatMessage;
use crate::error::AppError;

/// Payload forwarded to the external completion endpoint.
///
/// The endpoint itself is an opaque collaborator; this is its wire contract.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub message: String,
    pub category: String,
    pub conversation_history: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_anonymously: Option<bool>,
}

/// Trait for the chat completion collaborator.
///
/// Abstracted so tests can script replies without a network endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    /// Send one user message with its trailing context and return the
    /// assistant's reply text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError>;
}

/// Reqwest-backed client POSTing to the configured endpoint.
pub struct HttpChatClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpChatClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    response: Option<String>,
    error: Option<String>,
}

#[async_trait]
impl ChatCompletionClient for HttpChatClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Chat endpoint unreachable: {e}")))?;

        let status = response.status();
        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Malformed chat endpoint reply: {e}")))?;

        if let Some(error) = body.error {
            return Err(AppError::Upstream(error));
        }
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "Chat endpoint returned {status}"
            )));
        }

        body.response
            .ok_or_else(|| AppError::Upstream("Chat endpoint returned no response".into()))
    }
}
