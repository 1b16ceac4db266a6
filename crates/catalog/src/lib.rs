//! # Catalog Crate
//!
//! Entity store for the movie ratings API: users, movies, genres and
//! ratings held in memory, with the indices the filters and rankers need.
//!
//! ## Main Components
//!
//! - **types**: Domain types (User, Movie, Genre, Rating, Catalog)
//! - **parser**: Parse and render the `.dat` data files
//! - **index**: Load a data directory, compute movie stats, validate
//! - **seed**: Built-in demo data set
//! - **store**: `CatalogStore`, the locked handle the service layer uses
//! - **error**: Error types
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Catalog, CatalogStore};
//! use std::path::Path;
//!
//! let store = CatalogStore::open("data")?;
//! let catalog = store.read();
//! let movie = catalog.get_movie(1).unwrap();
//! println!("{} averages {}", movie.title, catalog.movie_stats(movie.id).avg_rating);
//! ```

pub mod error;
pub mod index;
pub mod parser;
pub mod seed;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use seed::demo_catalog;
pub use store::CatalogStore;
pub use types::{
    // Type aliases
    GenreId,
    MovieId,
    UserId,
    // Core types
    Catalog,
    Genre,
    Movie,
    MovieStats,
    Rating,
    RatingChange,
    RatingValue,
    User,
};
