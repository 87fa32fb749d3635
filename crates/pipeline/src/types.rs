//! Types produced by the resolver.

use omdb_client::{EntityRecord, MovieId};
use sources::Axis;

/// A fully resolved movie with a usable numeric score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMovie {
    pub record: EntityRecord,
    pub score: f64,
    pub axis: Option<Axis>,
}

impl ScoredMovie {
    pub fn imdb_id(&self) -> &MovieId {
        &self.record.imdb_id
    }
}
