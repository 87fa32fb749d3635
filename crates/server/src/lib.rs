//! Server crate for the movie aggregation engine.
//!
//! This crate contains the collector and aggregator that coordinate the
//! sources and pipeline crates into the two top-level operations, plus the
//! engine configuration.

pub mod collector;
pub mod config;
pub mod orchestrator;

pub use collector::{rank_and_cap, CategoryCollector};
pub use config::{ConfigError, EngineConfig, DEFAULT_SEED_VOCABULARY};
pub use orchestrator::{AggregateError, MovieAggregator, RankedResult, RelatedMovies};
