//! Filter to keep only movies tagged with a requested genre.
//!
//! Category search draws its candidates from broad search terms that have
//! nothing to do with the genre, so this is where the genre actually gets
//! applied.

use crate::traits::Filter;
use crate::types::ScoredMovie;

/// Keeps movies with at least one genre tag equal to the wanted genre,
/// ignoring case and surrounding whitespace.
pub struct GenreMatchFilter {
    genre: String,
}

impl GenreMatchFilter {
    pub fn new(genre: impl Into<String>) -> Self {
        Self {
            genre: genre.into().trim().to_string(),
        }
    }
}

impl Filter for GenreMatchFilter {
    fn name(&self) -> &str {
        "GenreMatchFilter"
    }

    fn keep(&self, movie: &ScoredMovie) -> bool {
        movie.record.has_genre(&self.genre)
    }
}
