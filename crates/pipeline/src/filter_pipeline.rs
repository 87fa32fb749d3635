//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use tracing::debug;

use crate::error::Rejection;
use crate::traits::Filter;
use crate::types::ScoredMovie;

/// Chains multiple filters together.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(GenreMatchFilter::new("Comedy"))
///     .add_filter(MinimumScoreFilter::new(6.0));
///
/// pipeline.check(&movie)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Run the filters in order; the first one that says no wins.
    pub fn check(&self, movie: &ScoredMovie) -> Result<(), Rejection> {
        for filter in &self.filters {
            if !filter.keep(movie) {
                debug!("{} dropped {}", filter.name(), movie.imdb_id());
                return Err(Rejection::Filtered {
                    id: movie.imdb_id().clone(),
                    filter: filter.name().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
