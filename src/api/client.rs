//! Pooled HTTP client with bearer authentication

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Hearth marketplace API client with connection pooling
#[derive(Clone)]
pub struct MarketClient {
    base_url: String,
    http_client: reqwest::Client,
    token: Option<String>,
}

impl MarketClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("hearth-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
            token,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http_client.request(method, self.endpoint(path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(reqwest::Method::GET, path);
        Self::read_json(request, path).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.request(reqwest::Method::POST, path).json(body);
        Self::read_json(request, path).await
    }

    pub(crate) async fn post_empty(&self, path: &str) -> Result<()> {
        let request = self.request(reqwest::Method::POST, path);
        Self::check_status(request, path).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let request = self.request(reqwest::Method::DELETE, path);
        Self::check_status(request, path).await
    }

    async fn read_json<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<T> {
        let response = Self::send_checked(request, path).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to decode response from {}", path))
    }

    async fn check_status(request: reqwest::RequestBuilder, path: &str) -> Result<()> {
        Self::send_checked(request, path).await?;
        Ok(())
    }

    async fn send_checked(
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Request to {} failed", path))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API returned {} for {}: {}", status, path, body);
        }

        Ok(response)
    }
}
