// src/news.rs
//! NewsAPI.org boundary: response schema, the `NewsSource` seam, and the
//! production reqwest client.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub const ENV_NEWS_API_KEY: &str = "NEWS_API_KEY";
pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/everything";
const NEWS_API_TIMEOUT: Duration = Duration::from_secs(10);

/* ----------------------------
External schema
---------------------------- */

// All fields optional: the API is trusted for uptime but not for shape.
// Defaults are applied here at the boundary, never deeper in.

#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub source: Option<ArticleSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleSource {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    status: String,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

impl Article {
    pub fn source_name(&self) -> Option<String> {
        self.source.as_ref().and_then(|s| s.name.clone())
    }
}

/* ----------------------------
Provider seam
---------------------------- */

/// Anything that can return recent headlines for a ticker symbol.
/// Tests stub this; production uses [`NewsApiClient`].
/// Send + Sync because the handler future holds a source across `.await`.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_headlines(&self, symbol: &str, limit: usize) -> Result<Vec<Article>>;
}

/* ----------------------------
Production client
---------------------------- */

pub struct NewsApiClient {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl NewsApiClient {
    /// Reads NEWS_API_KEY from the environment. A missing key is not fatal
    /// here; every fetch fails fast with a configuration error instead.
    pub fn from_env() -> Self {
        let api_key = std::env::var(ENV_NEWS_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self::new(api_key, DEFAULT_NEWS_API_URL)
    }

    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(NEWS_API_TIMEOUT)
            .build()
            .expect("http client");
        Self {
            api_key,
            base_url: base_url.into(),
            client,
        }
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn fetch_headlines(&self, symbol: &str, limit: usize) -> Result<Vec<Article>> {
        // Config error short-circuits before any network I/O.
        let Some(key) = self.api_key.as_deref() else {
            bail!("No NEWS_API_KEY configured.");
        };

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", symbol),
                ("pageSize", &limit.to_string()),
                ("sortBy", "publishedAt"),
                ("language", "en"),
                ("apiKey", key),
            ])
            .send()
            .await
            .with_context(|| format!("fetch error for {symbol}"))?
            .error_for_status()
            .with_context(|| format!("fetch error for {symbol}"))?;

        let data: NewsResponse = resp
            .json()
            .await
            .with_context(|| format!("decoding news api response for {symbol}"))?;

        if data.status != "ok" {
            bail!(
                "{}",
                data.message
                    .unwrap_or_else(|| "unknown error from news api".to_string())
            );
        }
        Ok(data.articles)
    }
}
