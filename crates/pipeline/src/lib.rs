//! Resolution and filtering of movie candidates.
//!
//! This crate provides:
//! - [`Resolver`], which turns a raw search hit into a [`ScoredMovie`] or a
//!   [`Rejection`]
//! - [`DedupSet`], the request-scoped record of accepted ids
//! - The [`Filter`] trait and [`FilterPipeline`] for post-resolution checks
//!
//! ## Architecture
//! Each candidate goes through:
//! 1. Cheap id checks (seed, already seen)
//! 2. Provider lookup under a deadline
//! 3. Score parsing
//! 4. Filters (genre match, minimum score)
//! 5. Atomic acceptance into the DedupSet
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{DedupSet, FilterPipeline, Resolver};
//! use pipeline::filters::GenreMatchFilter;
//!
//! let resolver = Resolver::new(provider.clone())
//!     .with_filters(FilterPipeline::new().add_filter(GenreMatchFilter::new("Comedy")));
//! let seen = DedupSet::new();
//!
//! match resolver.resolve_and_accept(&candidate, &seen).await {
//!     Ok(movie) => println!("{} {}", movie.record.title, movie.score),
//!     Err(rejection) => tracing::debug!("{}", rejection),
//! }
//! ```

pub mod dedup;
pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod resolver;
pub mod score;
pub mod traits;
pub mod types;

// Re-export main types
pub use dedup::DedupSet;
pub use error::Rejection;
pub use filter_pipeline::FilterPipeline;
pub use resolver::Resolver;
pub use score::parse_score;
pub use traits::Filter;
pub use types::ScoredMovie;
