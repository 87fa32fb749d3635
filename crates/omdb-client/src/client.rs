//! HTTP client for the OMDb API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{ProviderError, Result};
use crate::models::{is_success, MovieResponse, SearchResponse};
use crate::types::{EntityRecord, LookupKey, SearchPage};
use crate::MetadataProvider;

pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com";

/// OMDb's "no hits" message for searches
const NOT_FOUND_MESSAGE: &str = "Movie not found!";

/// Connection settings for [`OmdbClient`].
///
/// Built explicitly by the caller and handed to the client; nothing is
/// read from the environment here.
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Point the client at another host (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Metadata provider backed by omdbapi.com
#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    config: OmdbConfig,
}

impl OmdbClient {
    /// Create a client, validating the configuration.
    pub fn new(config: OmdbConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::InvalidConfig("api_key must be non-empty".into()));
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Create a client around an existing reqwest Client
    pub fn with_client(client: Client, config: OmdbConfig) -> Self {
        Self { client, config }
    }

    fn url(&self) -> String {
        format!("{}/", self.config.base_url.trim_end_matches('/'))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, query: &[(&str, &str)]) -> Result<T> {
        let response = self
            .client
            .get(self.url())
            .query(&[("apikey", self.config.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.config.timeout)
                } else {
                    ProviderError::Transport(e)
                }
            })?;
        self.handle_response(response).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("OMDb returned status {}", status);
            return Err(ProviderError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| ProviderError::Decode {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}

#[async_trait]
impl MetadataProvider for OmdbClient {
    async fn resolve(&self, key: &LookupKey) -> Result<EntityRecord> {
        let (param, value) = match key {
            LookupKey::Title(title) => ("t", title.as_str()),
            LookupKey::Id(id) => ("i", id.as_str()),
        };
        debug!("Resolving {}", key);

        let raw: MovieResponse = self.get(&[(param, value), ("plot", "short")]).await?;
        if !is_success(&raw.response) {
            let message = raw.error.unwrap_or_else(|| format!("no entity for {}", key));
            return Err(ProviderError::NotFound(message));
        }
        Ok(raw.into())
    }

    async fn search_page(&self, term: &str, page: u32) -> Result<SearchPage> {
        let page_param = page.to_string();
        debug!("Searching '{}' page {}", term, page);

        let raw: SearchResponse = self
            .get(&[("s", term), ("type", "movie"), ("page", page_param.as_str())])
            .await?;
        if !is_success(&raw.response) {
            return match raw.error.as_deref() {
                None | Some(NOT_FOUND_MESSAGE) => Err(ProviderError::NoMoreResults),
                // "Too many results.", "Invalid API key!", rate limits...
                Some(other) => Err(ProviderError::Api {
                    status_code: 200,
                    message: other.to_string(),
                }),
            };
        }

        let page = SearchPage::from(raw);
        if page.candidates.is_empty() {
            return Err(ProviderError::NoMoreResults);
        }
        Ok(page)
    }
}
