// src/services/fetcher.rs

//! Transport used to retrieve atlas responses.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::AtlasConfig;
use crate::utils::http;

/// Fetches the raw text behind a locator.
///
/// Any failure (network, timeout, non-2xx status) is reported as an error and
/// handled per identifier by the caller.
#[async_trait]
pub trait AtlasFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetcher backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the atlas settings.
    pub fn from_config(config: &AtlasConfig) -> Result<Self> {
        Ok(Self::new(http::create_async_client(config)?))
    }
}

#[async_trait]
impl AtlasFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        http::fetch_text(&self.client, url).await
    }
}
