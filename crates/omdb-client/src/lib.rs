//! Metadata provider client for the movie aggregation engine.
//!
//! This crate provides:
//! - Provider-neutral domain types ([`EntityRecord`], [`SearchCandidate`])
//! - The [`MetadataProvider`] trait the engine consumes
//! - [`OmdbClient`], an implementation over the OMDb HTTP API
//!
//! ## Example Usage
//! ```ignore
//! use omdb_client::{LookupKey, MetadataProvider, OmdbClient, OmdbConfig};
//!
//! let client = OmdbClient::new(OmdbConfig::new(api_key))?;
//! let movie = client.resolve(&LookupKey::Title("Heat".into())).await?;
//! let page = client.search_page("love", 1).await?;
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod types;

use async_trait::async_trait;

pub use client::{OmdbClient, OmdbConfig, DEFAULT_BASE_URL};
pub use error::{ProviderError, Result};
pub use types::{
    split_list, EntityRecord, LookupKey, MovieId, SearchCandidate, SearchPage, UNAVAILABLE_SCORE,
};

/// A source of movie metadata.
///
/// Implementations may fail for any reason (network, rate limits, missing
/// data). Callers treat every error except a failed seed lookup as a soft
/// miss.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Resolve one entity by title or id
    async fn resolve(&self, key: &LookupKey) -> Result<EntityRecord>;

    /// Fetch one page of search hits for `term` (pages start at 1).
    ///
    /// Returns [`ProviderError::NoMoreResults`] once the term is exhausted.
    async fn search_page(&self, term: &str, page: u32) -> Result<SearchPage>;
}
