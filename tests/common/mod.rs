use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use tempfile::TempDir;

use curhatin_content::app;
use curhatin_content::chat::client::{ChatCompletionClient, CompletionRequest};
use curhatin_content::chat::session::SessionStore;
use curhatin_content::config::AppConfig;
use curhatin_content::content::slug::{BaseCollation, SlugCollation};
use curhatin_content::content::store::ArticleStore;
use curhatin_content::db::json_store::JsonFileRepository;
use curhatin_content::error::AppError;
use curhatin_content::state::AppState;

pub const TEST_TOKEN: &str = "test-token";

/// Scripted stand-in for the completion endpoint: pops queued replies
/// (newest-queued last) and records every request it sees.
pub struct ScriptedChatClient {
    pub requests: std::sync::Mutex<Vec<CompletionRequest>>,
    replies: std::sync::Mutex<Vec<Result<String, AppError>>>,
}

impl ScriptedChatClient {
    pub fn new() -> Self {
        Self {
            requests: std::sync::Mutex::new(vec![]),
            replies: std::sync::Mutex::new(vec![]),
        }
    }

    pub fn queue_reply(&self, reply: Result<String, AppError>) {
        self.replies.lock().unwrap().insert(0, reply);
    }
}

#[async_trait]
impl ChatCompletionClient for ScriptedChatClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Ok("Baik, aku dengar. Ceritakan lebih lanjut.".to_string()))
    }
}

/// Test environment: the real router over a temp-dir JSON store and the
/// scripted chat client. The temp dir lives as long as this struct.
pub struct TestEnv {
    _data_dir: TempDir,
    pub server: TestServer,
    pub chat: Arc<ScriptedChatClient>,
}

impl TestEnv {
    pub fn start() -> Self {
        let data_dir = TempDir::new().expect("Failed to create temp dir");
        let data_file = data_dir.path().join("articles.json");

        let collation: Arc<dyn SlugCollation> = Arc::new(BaseCollation);
        let repo = Arc::new(JsonFileRepository::empty(data_file.clone(), collation.clone()));
        let articles = Arc::new(ArticleStore::new(repo, collation));

        let chat_client = Arc::new(ScriptedChatClient::new());
        let chat = Arc::new(SessionStore::new(chat_client.clone()));

        let config = Arc::new(AppConfig {
            bind_addr: "127.0.0.1:0".parse().expect("valid bind addr"),
            data_file,
            service_token: TEST_TOKEN.to_string(),
            chat_endpoint: "http://chat.invalid/api/chat".to_string(),
        });

        let state = AppState {
            articles,
            chat,
            config,
        };

        let server = TestServer::new(app::router(state));

        Self {
            _data_dir: data_dir,
            server,
            chat: chat_client,
        }
    }

    /// Create an article through the API and return the `article` object.
    pub async fn create_article(&self, title: &str, body: &str, status: &str) -> serde_json::Value {
        let response = self
            .server
            .post("/api/articles")
            .authorization_bearer(TEST_TOKEN)
            .json(&serde_json::json!({
                "title": title,
                "excerpt": "Ringkasan singkat.",
                "body": body,
                "status": status,
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
        response.json::<serde_json::Value>()["article"].clone()
    }
}
