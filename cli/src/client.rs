use anyhow::{bail, Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

/// Thin client over the content API. Mutations carry the service token as a
/// bearer credential.
pub struct ContentClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ContentClient {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Probe a slug, drafts included. `None` means the slug is free.
    pub async fn find_article(&self, slug: &str) -> Result<Option<Value>> {
        let response = self
            .http
            .get(format!("{}/api/articles/{slug}", self.base_url))
            .query(&[("includeDraft", "true")])
            .send()
            .await
            .context("request to content service failed")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = Self::read_json(response).await?;
        Ok(Some(body["article"].clone()))
    }

    pub async fn list_articles(&self) -> Result<Vec<Value>> {
        let response = self
            .http
            .get(format!("{}/api/articles", self.base_url))
            .query(&[("includeDraft", "true")])
            .send()
            .await
            .context("request to content service failed")?;

        let body = Self::read_json(response).await?;
        Ok(body["articles"].as_array().cloned().unwrap_or_default())
    }

    pub async fn create_article(&self, payload: &Value) -> Result<Value> {
        let response = self
            .http
            .post(format!("{}/api/articles", self.base_url))
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await
            .context("request to content service failed")?;

        let body = Self::read_json(response).await?;
        Ok(body["article"].clone())
    }

    pub async fn update_article(&self, slug: &str, payload: &Value) -> Result<Value> {
        let response = self
            .http
            .patch(format!("{}/api/articles/{slug}", self.base_url))
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await
            .context("request to content service failed")?;

        let body = Self::read_json(response).await?;
        Ok(body["article"].clone())
    }

    pub async fn delete_article(&self, slug: &str) -> Result<()> {
        let response = self
            .http
            .delete(format!("{}/api/articles/{slug}", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await
            .context("request to content service failed")?;

        Self::read_json(response).await?;
        Ok(())
    }

    async fn read_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .context("content service returned a non-JSON body")?;

        if !status.is_success() {
            let message = body["error"].as_str().unwrap_or("unknown error");
            bail!("content service replied {status}: {message}");
        }
        Ok(body)
    }
}
