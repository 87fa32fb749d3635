//! # Category Collector
//!
//! Drives one collection pass: stream candidates for a list of terms,
//! resolve them with bounded concurrency, keep the accepted ones, then rank
//! and cap.
//!
//! Resolutions run up to `concurrency` at a time, but results are consumed
//! in discovery order, and that is the order ids are claimed in the
//! request's DedupSet. The same provider answers therefore always produce
//! the same output.

use std::cmp::Ordering;
use std::time::Instant;

use futures::StreamExt;
use pipeline::{DedupSet, Rejection, Resolver, ScoredMovie};
use sources::{Axis, SearchSource};
use tracing::{debug, info, instrument};

/// Collects and ranks movies for one axis or category
pub struct CategoryCollector {
    source: SearchSource,
    resolver: Resolver,
    concurrency: usize,
    stop_at_limit: bool,
}

impl CategoryCollector {
    pub fn new(source: SearchSource, resolver: Resolver) -> Self {
        Self {
            source,
            resolver,
            concurrency: 8,
            stop_at_limit: false,
        }
    }

    /// Configure lookups in flight at once (default: 8)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Stop pulling candidates once `limit` have been accepted (default: false)
    pub fn with_stop_at_limit(mut self, stop: bool) -> Self {
        self.stop_at_limit = stop;
        self
    }

    /// Collect up to `limit` movies for `terms`, best score first.
    #[instrument(skip(self, terms, seen), fields(axis = ?axis, terms = terms.len()))]
    pub async fn collect(
        &self,
        terms: Vec<String>,
        axis: Option<Axis>,
        limit: usize,
        seen: &DedupSet,
    ) -> Vec<ScoredMovie> {
        if limit == 0 || terms.is_empty() {
            debug!("Nothing to collect");
            return Vec::new();
        }
        let start_time = Instant::now();

        let resolver = self.resolver.clone();
        let lookup_seen = seen.clone();
        let mut resolved = self
            .source
            .candidates(terms, axis)
            .map(move |candidate| {
                let resolver = resolver.clone();
                let seen = lookup_seen.clone();
                async move { resolver.resolve(&candidate, &seen).await }
            })
            .buffered(self.concurrency);

        let mut accepted: Vec<ScoredMovie> = Vec::new();
        let mut rejected = 0usize;
        while let Some(result) = resolved.next().await {
            match result.and_then(|movie| self.resolver.accept(movie, seen)) {
                Ok(movie) => {
                    debug!("Accepted {} ({})", movie.imdb_id(), movie.score);
                    accepted.push(movie);
                    if self.stop_at_limit && accepted.len() >= limit {
                        debug!("Reached limit of {}, stopping early", limit);
                        break;
                    }
                }
                Err(rejection) => {
                    rejected += 1;
                    log_rejection(&rejection);
                }
            }
        }
        // Dropping the stream here cancels any lookups still in flight
        drop(resolved);

        info!(
            "Collected {} movies ({} rejected) in {:.2?}",
            accepted.len(),
            rejected,
            start_time.elapsed()
        );
        rank_and_cap(accepted, limit)
    }
}

fn log_rejection(rejection: &Rejection) {
    match rejection {
        Rejection::ResolveFailed { .. } => debug!("Lookup failed: {}", rejection),
        _ => debug!("Rejected: {}", rejection),
    }
}

/// Sort by score descending and keep the first `limit`.
///
/// The sort is stable, so equal scores keep their discovery order.
pub fn rank_and_cap(mut movies: Vec<ScoredMovie>, limit: usize) -> Vec<ScoredMovie> {
    movies.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    movies.truncate(limit);
    movies
}

#[cfg(test)]
mod tests {
    use super::*;
    use omdb_client::EntityRecord;

    fn scored(id: &str, score: f64) -> ScoredMovie {
        ScoredMovie {
            record: EntityRecord {
                imdb_id: id.to_string(),
                title: id.to_string(),
                year: "2000".to_string(),
                genres: vec![],
                directors: vec![],
                actors: vec![],
                imdb_rating: score.to_string(),
                plot: None,
            },
            score,
            axis: None,
        }
    }

    fn ids(movies: &[ScoredMovie]) -> Vec<&str> {
        movies.iter().map(|m| m.imdb_id().as_str()).collect()
    }

    #[test]
    fn test_rank_and_cap_sorts_descending() {
        let ranked = rank_and_cap(vec![scored("a", 5.0), scored("b", 9.1), scored("c", 7.3)], 10);
        assert_eq!(ids(&ranked), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_rank_and_cap_truncates_after_sorting() {
        let ranked = rank_and_cap(
            vec![scored("a", 1.0), scored("b", 2.0), scored("c", 3.0), scored("d", 4.0)],
            2,
        );
        assert_eq!(ids(&ranked), vec!["d", "c"]);
    }

    #[test]
    fn test_rank_and_cap_keeps_discovery_order_on_ties() {
        let ranked = rank_and_cap(
            vec![scored("first", 7.0), scored("high", 8.0), scored("second", 7.0), scored("third", 7.0)],
            3,
        );
        assert_eq!(ids(&ranked), vec!["high", "first", "second"]);
    }

    #[test]
    fn test_rank_and_cap_empty() {
        assert!(rank_and_cap(vec![], 5).is_empty());
        assert!(rank_and_cap(vec![scored("a", 1.0)], 0).is_empty());
    }
}
