use anyhow::{Context as _, bail};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Authenticated handle to a CTFd instance's REST API.
#[derive(Clone, Debug)]
pub struct CtfdClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl CtfdClient {
    /// `base_url` must not end with `/`.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and decode the fully buffered body as JSON.
    pub async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> anyhow::Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, ?query, "CTFd request");

        let response = self
            .http
            .get(&url)
            .query(query)
            .header("Authorization", format!("Token {}", self.token))
            .header("Content-Type", "application/json")
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("failed to read response body from {url}"))?;

        if !status.is_success() {
            bail!(
                "CTFd returned {status} for {url}: {}",
                String::from_utf8_lossy(&body).trim()
            );
        }

        serde_json::from_slice(&body)
            .with_context(|| format!("failed to decode response body from {url}"))
    }
}
