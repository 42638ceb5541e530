//! Catalog access
//!
//! This module defines the [`DetailSource`] seam through which raw item details
//! are obtained, and [`CatalogClient`], the HTTP implementation backed by
//! `reqwest`.
//!
//! - `config`: HTTP client configuration and building

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::constants::catalog;
use crate::errors::{FetchError, FetchResult};

pub mod config;

pub use config::ClientConfig;

/// Anything that can produce the raw details body for an identifier
#[async_trait]
pub trait DetailSource: Send + Sync {
    /// Fetch the raw response body for `id`
    async fn fetch_details(&self, id: u64) -> FetchResult<String>;
}

/// HTTP client for the catalog details endpoint
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    url_template: String,
}

impl CatalogClient {
    /// Creates a client with default configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::ClientBuild` if the HTTP client cannot be built
    pub fn new() -> FetchResult<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Creates a client with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::ClientBuild` if the HTTP client cannot be built
    pub fn with_config(config: &ClientConfig) -> FetchResult<Self> {
        let client = config.build_http_client()?;

        tracing::info!("Created catalog client for {}", config.url_template);

        Ok(Self {
            client,
            url_template: config.url_template.clone(),
        })
    }

    /// Build the details URL for an identifier
    pub fn details_url(&self, id: u64) -> FetchResult<Url> {
        let raw = self
            .url_template
            .replace(catalog::ID_PLACEHOLDER, &id.to_string());
        Url::parse(&raw).map_err(|e| FetchError::InvalidUrl {
            url: raw,
            error: e.to_string(),
        })
    }
}

#[async_trait]
impl DetailSource for CatalogClient {
    async fn fetch_details(&self, id: u64) -> FetchResult<String> {
        let url = self.details_url(id)?;
        debug!("Fetching details for {} from {}", id, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http { id, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError {
                id,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| FetchError::Http { id, source })
    }
}
