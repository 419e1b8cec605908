use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

/// Service configuration read from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Path of the JSON file holding the article collection.
    pub data_file: PathBuf,
    /// Bearer token required on mutating article routes.
    pub service_token: String,
    /// External chat completion endpoint messages are proxied to.
    pub chat_endpoint: String,
}

impl AppConfig {
    /// Build the config from environment variables.
    ///
    /// Recognized env vars (all optional):
    /// - `CONTENT_BIND_ADDR` (default `127.0.0.1:3000`)
    /// - `CONTENT_DATA_FILE` (default `data/articles.json`)
    /// - `SERVICE_TOKEN` (default `dev-token`)
    /// - `CHAT_ENDPOINT` (default `http://localhost:8080/api/chat`)
    pub fn from_env() -> Result<Self, AppError> {
        let bind_addr = std::env::var("CONTENT_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid CONTENT_BIND_ADDR: {e}")))?;

        Ok(Self {
            bind_addr,
            data_file: std::env::var("CONTENT_DATA_FILE")
                .unwrap_or_else(|_| "data/articles.json".to_string())
                .into(),
            service_token: std::env::var("SERVICE_TOKEN")
                .unwrap_or_else(|_| "dev-token".to_string()),
            chat_endpoint: std::env::var("CHAT_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:8080/api/chat".to_string()),
        })
    }
}
