//! Candidate types shared by the sources and the rest of the engine.

use std::fmt;

use omdb_client::{MovieId, SearchCandidate};
use serde::{Deserialize, Serialize};

/// The relation dimension a candidate was found through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Genre,
    Director,
    Actor,
}

impl Axis {
    /// All axes in the order relation search walks them
    pub const ALL: [Axis; 3] = [Axis::Genre, Axis::Director, Axis::Actor];

    pub fn label(&self) -> &'static str {
        match self {
            Axis::Genre => "Genre",
            Axis::Director => "Director",
            Axis::Actor => "Actor",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A search hit plus where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub movie: SearchCandidate,
    /// Set for relation search, `None` for plain category search
    pub axis: Option<Axis>,
    /// The query term that produced this hit
    pub term: String,
    /// Page the hit was on (1-based)
    pub page: u32,
}

impl Candidate {
    pub fn new(movie: SearchCandidate, axis: Option<Axis>, term: impl Into<String>, page: u32) -> Self {
        Self {
            movie,
            axis,
            term: term.into(),
            page,
        }
    }

    pub fn imdb_id(&self) -> &MovieId {
        &self.movie.imdb_id
    }
}
