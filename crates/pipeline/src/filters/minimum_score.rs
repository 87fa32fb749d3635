//! Filter to enforce a minimum rating.
//!
//! Optional quality floor on top of the "has a rating at all" rule the
//! resolver always applies.

use crate::traits::Filter;
use crate::types::ScoredMovie;

/// Removes movies rated below `min_score`.
pub struct MinimumScoreFilter {
    min_score: f64,
}

impl MinimumScoreFilter {
    /// Create a new MinimumScoreFilter.
    ///
    /// # Arguments
    /// * `min_score` - Lowest rating kept (inclusive)
    pub fn new(min_score: f64) -> Self {
        Self { min_score }
    }
}

impl Filter for MinimumScoreFilter {
    fn name(&self) -> &str {
        "MinimumScoreFilter"
    }

    fn keep(&self, movie: &ScoredMovie) -> bool {
        movie.score >= self.min_score
    }
}
