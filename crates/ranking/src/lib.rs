//! Filtering, aggregation and ranking of catalog movies.
//!
//! This crate provides:
//! - MovieFilter trait and the title/year/genre filters
//! - FilterPipeline for composing filters (logical AND)
//! - Rounding of averages to the nearest 0.5
//! - Global and per-user top-rated rankings
//!
//! ## Example Usage
//! ```ignore
//! use ranking::{filter_movies, top_rated, MovieQuery, TOP_RATED_LIMIT};
//!
//! let query = MovieQuery { genre: Some("Drama".into()), ..Default::default() };
//! let dramas = filter_movies(&catalog, &query);
//! let best = top_rated(&catalog, TOP_RATED_LIMIT);
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod query;
pub mod ranker;
pub mod rounding;
pub mod summary;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use query::{filter_movies, MovieQuery};
pub use ranker::{best_rating_per_movie, top_rated, top_rated_by_user, TOP_RATED_LIMIT};
pub use rounding::{round_to_nearest, round_to_nearest_half};
pub use summary::MovieSummary;
pub use traits::MovieFilter;
