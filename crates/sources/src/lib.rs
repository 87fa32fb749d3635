//! # Sources Crate
//!
//! This crate implements candidate generation for the movie aggregation
//! engine.
//!
//! ## Components
//!
//! ### Search Source
//! Pages through provider searches for a list of query terms and yields a
//! lazy stream of raw candidates. Category search feeds it a fixed broad
//! vocabulary; relation search feeds it one axis of the seed's terms.
//!
//! ### Seed Context
//! Splits a resolved seed movie into per-axis query terms
//! (genre, director, actor).
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{Axis, SearchSource, build_seed_context};
//!
//! let source = SearchSource::new(provider.clone()).with_max_pages(2);
//! let context = build_seed_context(&seed_record);
//!
//! let mut stream = source.candidates(context.terms(Axis::Genre).to_vec(), Some(Axis::Genre));
//! while let Some(candidate) = stream.next().await {
//!     // resolve, filter, collect...
//! }
//! ```

// Public modules
pub mod search;
pub mod seed_context;
pub mod types;

// Re-export commonly used types
pub use search::SearchSource;
pub use seed_context::{build_seed_context, SeedContext};
pub use types::{Axis, Candidate};
