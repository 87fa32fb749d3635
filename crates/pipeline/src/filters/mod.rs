//! Filter implementations for the resolver pipeline.
//!
//! This module contains the concrete filters that can be composed into a
//! FilterPipeline.

pub mod genre_match;
pub mod minimum_score;

// Re-export for convenience
pub use genre_match::GenreMatchFilter;
pub use minimum_score::MinimumScoreFilter;
