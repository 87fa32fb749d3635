//! Simple test harness for the movie aggregator.
//!
//! Runs one category search and one relation search against the live OMDb
//! API and logs the results. Needs `OMDB_API_KEY` in the environment.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use omdb_client::{OmdbClient, OmdbConfig};
use server::{EngineConfig, MovieAggregator};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,server=debug")),
        )
        .init();

    info!("Starting aggregator test harness");

    let api_key = std::env::var("OMDB_API_KEY").context("OMDB_API_KEY must be set")?;
    let config = EngineConfig::default();
    let client = OmdbClient::new(OmdbConfig::new(api_key).with_timeout(config.call_timeout()))
        .context("Failed to build OMDb client")?;
    let aggregator = MovieAggregator::new(Arc::new(client), config);

    let genre = "Comedy";
    let limit = aggregator.config().category_limit;
    info!("Top {} movies for genre {}", limit, genre);
    let results = aggregator.find_by_category(genre, limit).await;
    for (i, movie) in results.iter().enumerate() {
        info!("{}. {} ({}) - {} [{}]", i + 1, movie.title, movie.year, movie.imdb_rating, movie.genre);
    }

    let seed = "Inception";
    info!("Movies related to {}", seed);
    let related = aggregator.find_related(seed).await?;
    for axis in sources::Axis::ALL {
        info!("By {}:", axis);
        for movie in related.axis(axis) {
            info!("   {} ({}) - {}", movie.title, movie.year, movie.imdb_rating);
        }
    }

    Ok(())
}
