//! Helpers to build a SeedContext from a resolved seed movie
//!
//! Relation search starts from one movie and searches outward along each
//! axis. This module collects everything that search needs from the seed
//! up front so the collectors never look at the seed record again.

use omdb_client::{EntityRecord, MovieId};

use crate::types::Axis;

/// What relation search needs to know about its seed movie
#[derive(Debug, Clone, PartialEq)]
pub struct SeedContext {
    pub seed_id: MovieId,
    pub seed_title: String,
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub actors: Vec<String>,
}

impl SeedContext {
    /// Query terms for one axis, in the order the provider listed them
    pub fn terms(&self, axis: Axis) -> &[String] {
        match axis {
            Axis::Genre => &self.genres,
            Axis::Director => &self.directors,
            Axis::Actor => &self.actors,
        }
    }
}

/// Build a SeedContext from the seed's full record.
///
/// Duplicate terms within an axis are dropped (keeping the first), so a
/// record listing the same actor twice is only searched once.
pub fn build_seed_context(seed: &EntityRecord) -> SeedContext {
    SeedContext {
        seed_id: seed.imdb_id.clone(),
        seed_title: seed.title.clone(),
        genres: dedup_terms(&seed.genres),
        directors: dedup_terms(&seed.directors),
        actors: dedup_terms(&seed.actors),
    }
}

fn dedup_terms(terms: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        let term = term.trim();
        if term.is_empty() || out.iter().any(|t| t.eq_ignore_ascii_case(term)) {
            continue;
        }
        out.push(term.to_string());
    }
    out
}
