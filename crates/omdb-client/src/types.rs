//! Core domain types returned by a metadata provider.
//!
//! These are the provider-neutral shapes the rest of the workspace works
//! with. Wire formats live in [`crate::models`] and are converted into
//! these types at the client boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value the provider uses for "no rating available"
pub const UNAVAILABLE_SCORE: &str = "N/A";

/// Identifier of an entity at the provider (an IMDb id such as `tt0133093`)
pub type MovieId = String;

/// How to look up a single entity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupKey {
    Title(String),
    Id(MovieId),
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Title(title) => write!(f, "title={}", title),
            LookupKey::Id(id) => write!(f, "id={}", id),
        }
    }
}

/// Full detail for one movie.
///
/// `imdb_rating` is kept exactly as the provider sent it. It may be
/// [`UNAVAILABLE_SCORE`] or some other non-numeric string; parsing it is
/// the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub imdb_id: MovieId,
    pub title: String,
    pub year: String,
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub actors: Vec<String>,
    pub imdb_rating: String,
    pub plot: Option<String>,
}

impl EntityRecord {
    /// Whether any genre tag equals `genre`, ignoring case and surrounding whitespace
    pub fn has_genre(&self, genre: &str) -> bool {
        let wanted = genre.trim();
        self.genres.iter().any(|g| g.trim().eq_ignore_ascii_case(wanted))
    }
}

/// A lightweight search hit, not yet resolved to full detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub imdb_id: MovieId,
    pub title: String,
    pub year: String,
}

/// One page of search hits
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub candidates: Vec<SearchCandidate>,
    /// Total hits the provider reports for the term, if it said
    pub total_results: Option<u32>,
}

/// Split a comma-delimited provider field into trimmed, non-empty parts.
///
/// The provider's `"N/A"` placeholder yields an empty list.
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.trim() == UNAVAILABLE_SCORE {
        return Vec::new();
    }
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
