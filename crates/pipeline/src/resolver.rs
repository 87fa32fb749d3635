//! Candidate resolver.
//!
//! Takes a raw search hit, fetches full detail from the provider and decides
//! whether it is worth ranking. Provider failures never escape from here;
//! they come back as a [`Rejection`] like any other reason to drop a
//! candidate.
//!
//! ## Algorithm
//! 1. Drop the seed movie and anything already accepted (no provider call)
//! 2. Resolve full detail by id, under a deadline
//! 3. Parse the rating; unavailable or malformed ratings are rejected
//! 4. Run the post-resolution filters
//! 5. Accept: atomically mark the id as seen, rejecting if someone else got
//!    there first
//!
//! Steps 1-4 are [`Resolver::resolve`] and may run concurrently for many
//! candidates. Step 5 is [`Resolver::accept`]; collectors call it in
//! discovery order so the winner among duplicates is deterministic.

use std::sync::Arc;
use std::time::Duration;

use omdb_client::{EntityRecord, LookupKey, MetadataProvider, MovieId, ProviderError};
use sources::Candidate;
use tracing::debug;

use crate::dedup::DedupSet;
use crate::error::Rejection;
use crate::filter_pipeline::FilterPipeline;
use crate::score::parse_score;
use crate::types::ScoredMovie;

/// Resolves and vets candidates for one collection pass
#[derive(Clone)]
pub struct Resolver {
    provider: Arc<dyn MetadataProvider>,
    filters: Arc<FilterPipeline>,
    /// Never accept this id (the relation-search seed)
    exclude_id: Option<MovieId>,
    call_timeout: Duration,
}

impl Resolver {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            provider,
            filters: Arc::new(FilterPipeline::new()),
            exclude_id: None,
            call_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_filters(mut self, filters: FilterPipeline) -> Self {
        self.filters = Arc::new(filters);
        self
    }

    pub fn excluding(mut self, id: impl Into<MovieId>) -> Self {
        self.exclude_id = Some(id.into());
        self
    }

    /// Configure the per-lookup deadline (default: 10s)
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Resolve and vet one candidate without marking it as seen.
    pub async fn resolve(&self, candidate: &Candidate, seen: &DedupSet) -> Result<ScoredMovie, Rejection> {
        let id = candidate.imdb_id();
        if self.exclude_id.as_deref() == Some(id.as_str()) {
            return Err(Rejection::Seed(id.clone()));
        }
        if seen.contains(id) {
            return Err(Rejection::Duplicate(id.clone()));
        }

        let mut record = self
            .lookup(id)
            .await
            .map_err(|source| Rejection::ResolveFailed { id: id.clone(), source })?;
        if record.imdb_id.is_empty() {
            record.imdb_id = id.clone();
        }

        let score = parse_score(&record.imdb_id, &record.imdb_rating)?;
        let movie = ScoredMovie {
            record,
            score,
            axis: candidate.axis,
        };
        self.filters.check(&movie)?;
        Ok(movie)
    }

    /// Claim the movie's id in `seen`; only the first claim is accepted.
    pub fn accept(&self, movie: ScoredMovie, seen: &DedupSet) -> Result<ScoredMovie, Rejection> {
        if seen.claim(movie.imdb_id()) {
            Ok(movie)
        } else {
            Err(Rejection::Duplicate(movie.imdb_id().clone()))
        }
    }

    /// [`Resolver::resolve`] followed by [`Resolver::accept`]
    pub async fn resolve_and_accept(
        &self,
        candidate: &Candidate,
        seen: &DedupSet,
    ) -> Result<ScoredMovie, Rejection> {
        let movie = self.resolve(candidate, seen).await?;
        self.accept(movie, seen)
    }

    async fn lookup(&self, id: &MovieId) -> Result<EntityRecord, ProviderError> {
        let key = LookupKey::Id(id.clone());
        match tokio::time::timeout(self.call_timeout, self.provider.resolve(&key)).await {
            Ok(result) => result,
            Err(_) => {
                debug!("Lookup of {} timed out after {:?}", id, self.call_timeout);
                Err(ProviderError::Timeout(self.call_timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::GenreMatchFilter;
    use async_trait::async_trait;
    use omdb_client::{split_list, SearchCandidate, SearchPage};
    use sources::Axis;
    use std::collections::HashMap;

    /// Provider with a fixed id -> record table. Ids starting with
    /// "slow" never answer, ids starting with "broken" fail to decode.
    struct TableProvider {
        records: HashMap<String, EntityRecord>,
    }

    impl TableProvider {
        fn new(rows: &[(&str, &str, &str)]) -> Self {
            let records = rows
                .iter()
                .map(|(id, genre, rating)| {
                    let record = EntityRecord {
                        imdb_id: id.to_string(),
                        title: format!("Movie {}", id),
                        year: "2010".to_string(),
                        genres: split_list(genre),
                        directors: vec![],
                        actors: vec![],
                        imdb_rating: rating.to_string(),
                        plot: None,
                    };
                    (id.to_string(), record)
                })
                .collect();
            Self { records }
        }
    }

    #[async_trait]
    impl MetadataProvider for TableProvider {
        async fn resolve(&self, key: &LookupKey) -> omdb_client::Result<EntityRecord> {
            let LookupKey::Id(id) = key else {
                return Err(ProviderError::NotFound(key.to_string()));
            };
            if id.starts_with("slow") {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            if id.starts_with("broken") {
                return Err(ProviderError::Api {
                    status_code: 500,
                    message: "boom".into(),
                });
            }
            self.records
                .get(id)
                .cloned()
                .ok_or_else(|| ProviderError::NotFound(id.clone()))
        }

        async fn search_page(&self, _term: &str, _page: u32) -> omdb_client::Result<SearchPage> {
            Err(ProviderError::NoMoreResults)
        }
    }

    fn candidate(id: &str) -> Candidate {
        let movie = SearchCandidate {
            imdb_id: id.to_string(),
            title: id.to_string(),
            year: "2010".to_string(),
        };
        Candidate::new(movie, Some(Axis::Genre), "Drama", 1)
    }

    fn resolver(rows: &[(&str, &str, &str)]) -> Resolver {
        Resolver::new(Arc::new(TableProvider::new(rows))).with_call_timeout(Duration::from_millis(20))
    }

    #[tokio::test]
    async fn test_accepts_and_marks_seen() {
        let resolver = resolver(&[("tt1", "Drama", "7.9")]);
        let seen = DedupSet::new();

        let movie = resolver.resolve_and_accept(&candidate("tt1"), &seen).await.unwrap();

        assert_eq!(movie.score, 7.9);
        assert_eq!(movie.axis, Some(Axis::Genre));
        assert!(seen.contains("tt1"));
    }

    #[tokio::test]
    async fn test_rejects_already_seen_without_lookup() {
        // "slow1" would hang if it were looked up
        let resolver = resolver(&[]);
        let seen = DedupSet::with_seen(["slow1".to_string()]);

        let result = resolver.resolve(&candidate("slow1"), &seen).await;
        assert!(matches!(result, Err(Rejection::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_rejects_seed() {
        let resolver = resolver(&[("tt-seed", "Drama", "9.0")]).excluding("tt-seed");
        let seen = DedupSet::new();

        let result = resolver.resolve_and_accept(&candidate("tt-seed"), &seen).await;
        assert!(matches!(result, Err(Rejection::Seed(_))));
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_unavailable_and_malformed_scores() {
        let resolver = resolver(&[("tt1", "Drama", "N/A"), ("tt2", "Drama", "great")]);
        let seen = DedupSet::new();

        let unavailable = resolver.resolve_and_accept(&candidate("tt1"), &seen).await;
        let malformed = resolver.resolve_and_accept(&candidate("tt2"), &seen).await;

        assert!(matches!(unavailable, Err(Rejection::UnavailableScore(_))));
        assert!(matches!(malformed, Err(Rejection::MalformedScore { .. })));
        assert!(seen.is_empty(), "rejected ids must not be marked seen");
    }

    #[tokio::test]
    async fn test_provider_failures_become_rejections() {
        let resolver = resolver(&[]);
        let seen = DedupSet::new();

        let missing = resolver.resolve(&candidate("tt404"), &seen).await;
        let broken = resolver.resolve(&candidate("broken1"), &seen).await;
        let slow = resolver.resolve(&candidate("slow1"), &seen).await;

        assert!(matches!(missing, Err(Rejection::ResolveFailed { .. })));
        assert!(matches!(broken, Err(Rejection::ResolveFailed { .. })));
        match slow {
            Err(Rejection::ResolveFailed { source, .. }) => {
                assert!(matches!(source, ProviderError::Timeout(_)))
            }
            other => panic!("expected timeout rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_filters_apply_after_resolution() {
        let resolver = resolver(&[("tt1", "Comedy", "6.0"), ("tt2", "Drama", "8.0")])
            .with_filters(FilterPipeline::new().add_filter(GenreMatchFilter::new("comedy")));
        let seen = DedupSet::new();

        assert!(resolver.resolve_and_accept(&candidate("tt1"), &seen).await.is_ok());
        let dropped = resolver.resolve_and_accept(&candidate("tt2"), &seen).await;
        assert!(matches!(dropped, Err(Rejection::Filtered { .. })));
    }

    #[tokio::test]
    async fn test_accept_is_first_come_first_served() {
        let resolver = resolver(&[("tt1", "Drama", "7.0")]);
        let seen = DedupSet::new();

        // Two in-flight resolutions of the same id both pass resolve()...
        let first = resolver.resolve(&candidate("tt1"), &seen).await.unwrap();
        let second = resolver.resolve(&candidate("tt1"), &seen).await.unwrap();

        // ...but only one is accepted
        assert!(resolver.accept(first, &seen).is_ok());
        assert!(matches!(resolver.accept(second, &seen), Err(Rejection::Duplicate(_))));
    }
}
