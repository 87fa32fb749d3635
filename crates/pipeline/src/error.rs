//! Why a candidate was not forwarded.
//!
//! Every way a candidate can drop out of the pipeline is a variant here, so
//! callers log a reason instead of silently discarding a failed `Result`.

use omdb_client::{MovieId, ProviderError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Rejection {
    /// Already accepted earlier in this request
    #[error("{0} was already collected")]
    Duplicate(MovieId),

    /// The relation-search seed itself
    #[error("{0} is the seed movie")]
    Seed(MovieId),

    /// Lookup failed, timed out, or could not be decoded
    #[error("could not resolve {id}: {source}")]
    ResolveFailed {
        id: MovieId,
        #[source]
        source: ProviderError,
    },

    /// The provider has no rating for this movie
    #[error("{0} has no rating")]
    UnavailableScore(MovieId),

    /// The rating is present but not a number
    #[error("{id} has malformed rating {raw:?}")]
    MalformedScore { id: MovieId, raw: String },

    /// A post-resolution filter said no
    #[error("{id} rejected by {filter}")]
    Filtered { id: MovieId, filter: String },
}
