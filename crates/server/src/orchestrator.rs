//! # Movie Aggregator
//!
//! This module answers the two top-level questions:
//! - "top movies in genre G" (category search)
//! - "movies related to seed S" by genre, director and actor (relation search)
//!
//! Category search:
//! 1. Stream candidates for the broad seed vocabulary
//! 2. Resolve each one, keep those tagged with G and carrying a rating
//! 3. Rank by rating and cap
//!
//! Relation search:
//! 1. Resolve the seed (the only step whose failure fails the request)
//! 2. Split its genres, directors and actors into query terms
//! 3. Run one collector per axis over a shared DedupSet seeded with the
//!    seed's own id
//! 4. Return the three ranked lists side by side
//!
//! Nothing is cached; every call builds its own DedupSet.

use std::sync::Arc;
use std::time::Instant;

use omdb_client::{EntityRecord, LookupKey, MetadataProvider, ProviderError};
use pipeline::filters::{GenreMatchFilter, MinimumScoreFilter};
use pipeline::{DedupSet, FilterPipeline, Resolver, ScoredMovie};
use serde::Serialize;
use sources::{build_seed_context, Axis, SearchSource, SeedContext};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::collector::CategoryCollector;
use crate::config::EngineConfig;

/// One ranked movie as returned to callers.
///
/// Serialized field names match the existing JSON API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Parsed form of `imdb_rating`
    #[serde(skip)]
    pub score: f64,
    /// Which relation axis produced this result (relation search only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
}

impl From<ScoredMovie> for RankedResult {
    fn from(movie: ScoredMovie) -> Self {
        Self {
            genre: movie.record.genres.join(", "),
            title: movie.record.title,
            year: movie.record.year,
            imdb_rating: movie.record.imdb_rating,
            imdb_id: movie.record.imdb_id,
            score: movie.score,
            axis: movie.axis,
        }
    }
}

/// Relation search answer: one ranked list per axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedMovies {
    #[serde(rename = "seedTitle")]
    pub seed_title: String,
    #[serde(rename = "byTag")]
    pub by_genre: Vec<RankedResult>,
    #[serde(rename = "byContributorA")]
    pub by_director: Vec<RankedResult>,
    #[serde(rename = "byContributorB")]
    pub by_actor: Vec<RankedResult>,
}

impl RelatedMovies {
    pub fn axis(&self, axis: Axis) -> &[RankedResult] {
        match axis {
            Axis::Genre => &self.by_genre,
            Axis::Director => &self.by_director,
            Axis::Actor => &self.by_actor,
        }
    }
}

/// Request-level failures. Everything else degrades to fewer results.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Seed movie '{title}' not found: {source}")]
    SeedNotFound {
        title: String,
        #[source]
        source: ProviderError,
    },

    #[error("Movie {key} not found: {source}")]
    MovieNotFound {
        key: LookupKey,
        #[source]
        source: ProviderError,
    },
}

/// Coordinates sources, resolvers and collectors for each request
#[derive(Clone)]
pub struct MovieAggregator {
    provider: Arc<dyn MetadataProvider>,
    source: SearchSource,
    config: Arc<EngineConfig>,
}

impl MovieAggregator {
    /// Create an aggregator over `provider`
    ///
    /// # Arguments
    /// * `provider` - Shared metadata provider (OMDb in production, stubs in tests)
    /// * `config` - Limits, paging, concurrency and timeouts
    pub fn new(provider: Arc<dyn MetadataProvider>, config: EngineConfig) -> Self {
        let source = SearchSource::new(Arc::clone(&provider))
            .with_max_pages(config.max_pages_per_term)
            .with_call_timeout(config.call_timeout());
        Self {
            provider,
            source,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Look up a single movie by title or id
    pub async fn lookup_movie(&self, key: LookupKey) -> Result<EntityRecord, AggregateError> {
        match self.resolve_with_timeout(&key).await {
            Ok(record) => Ok(record),
            Err(source) => Err(AggregateError::MovieNotFound { key, source }),
        }
    }

    /// Top movies tagged with `genre`, best rated first, at most `limit`.
    ///
    /// Never fails: provider trouble just means fewer results.
    #[instrument(skip(self))]
    pub async fn find_by_category(&self, genre: &str, limit: usize) -> Vec<RankedResult> {
        let start_time = Instant::now();

        let resolver = self
            .base_resolver()
            .with_filters(self.filters(Some(genre)));
        let collector = self.collector(resolver);
        let terms: Vec<String> = self
            .config
            .seed_vocabulary
            .iter()
            .map(|term| term.trim().to_string())
            .filter(|term| !term.is_empty())
            .collect();

        let seen = DedupSet::new();
        let movies = collector.collect(terms, None, limit, &seen).await;

        info!(
            "Category '{}' produced {} results in {:.2?}",
            genre,
            movies.len(),
            start_time.elapsed()
        );
        movies.into_iter().map(RankedResult::from).collect()
    }

    /// Movies related to the seed titled `seed_title`, per axis.
    #[instrument(skip(self))]
    pub async fn find_related(&self, seed_title: &str) -> Result<RelatedMovies, AggregateError> {
        let start_time = Instant::now();

        // Resolve the seed; this is the one fatal step
        let key = LookupKey::Title(seed_title.to_string());
        let seed = self
            .resolve_with_timeout(&key)
            .await
            .map_err(|source| {
                warn!("Seed '{}' could not be resolved: {}", seed_title, source);
                AggregateError::SeedNotFound {
                    title: seed_title.to_string(),
                    source,
                }
            })?;
        let context = build_seed_context(&seed);
        info!(
            "Resolved seed '{}' ({}): {} genres, {} directors, {} actors",
            context.seed_title,
            context.seed_id,
            context.genres.len(),
            context.directors.len(),
            context.actors.len()
        );

        let seen = DedupSet::with_seen([context.seed_id.clone()]);
        let resolver = self
            .base_resolver()
            .excluding(context.seed_id.clone())
            .with_filters(self.filters(None));
        let collector = self.collector(resolver);

        let (by_genre, by_director, by_actor) = if self.config.parallel_axes {
            tokio::join!(
                self.collect_axis(&collector, &context, Axis::Genre, &seen),
                self.collect_axis(&collector, &context, Axis::Director, &seen),
                self.collect_axis(&collector, &context, Axis::Actor, &seen),
            )
        } else {
            let by_genre = self.collect_axis(&collector, &context, Axis::Genre, &seen).await;
            let by_director = self.collect_axis(&collector, &context, Axis::Director, &seen).await;
            let by_actor = self.collect_axis(&collector, &context, Axis::Actor, &seen).await;
            (by_genre, by_director, by_actor)
        };

        info!(
            "Related to '{}': {} by genre, {} by director, {} by actor in {:.2?}",
            context.seed_title,
            by_genre.len(),
            by_director.len(),
            by_actor.len(),
            start_time.elapsed()
        );
        Ok(RelatedMovies {
            seed_title: context.seed_title,
            by_genre,
            by_director,
            by_actor,
        })
    }

    async fn collect_axis(
        &self,
        collector: &CategoryCollector,
        context: &SeedContext,
        axis: Axis,
        seen: &DedupSet,
    ) -> Vec<RankedResult> {
        let terms = context.terms(axis).to_vec();
        collector
            .collect(terms, Some(axis), self.config.related_limit, seen)
            .await
            .into_iter()
            .map(RankedResult::from)
            .collect()
    }

    fn base_resolver(&self) -> Resolver {
        Resolver::new(Arc::clone(&self.provider)).with_call_timeout(self.config.call_timeout())
    }

    fn filters(&self, genre: Option<&str>) -> FilterPipeline {
        let mut filters = FilterPipeline::new();
        if let Some(genre) = genre {
            filters = filters.add_filter(GenreMatchFilter::new(genre));
        }
        if let Some(min_score) = self.config.min_score {
            filters = filters.add_filter(MinimumScoreFilter::new(min_score));
        }
        filters
    }

    fn collector(&self, resolver: Resolver) -> CategoryCollector {
        CategoryCollector::new(self.source.clone(), resolver)
            .with_concurrency(self.config.concurrency)
            .with_stop_at_limit(self.config.stop_at_limit)
    }

    async fn resolve_with_timeout(&self, key: &LookupKey) -> Result<EntityRecord, ProviderError> {
        let timeout = self.config.call_timeout();
        match tokio::time::timeout(timeout, self.provider.resolve(key)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(timeout)),
        }
    }
}
