//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible checks to be applied to resolved movies.

use crate::types::ScoredMovie;

/// Core trait for filtering resolved movies.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across concurrent resolutions
/// - Filters only look at one movie at a time; request-wide concerns such as
///   deduplication live in [`crate::DedupSet`]
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `movie` should be kept.
    fn keep(&self, movie: &ScoredMovie) -> bool;
}
