//! Core traits for movie filtering.
//!
//! This module defines the MovieFilter trait that lets each search
//! criterion be composed into a FilterPipeline.

use catalog::{Catalog, Movie};

/// One search criterion.
///
/// ## Design Note
/// - `Send + Sync` so a built pipeline can be shared across request tasks
/// - Filters take ownership of the candidate Vec and return the survivors,
///   so chaining filters never clones movies
pub trait MovieFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Keep only the movies that satisfy this criterion.
    ///
    /// # Arguments
    /// * `movies` - The candidate movies (takes ownership)
    /// * `catalog` - Catalog the movies borrow from, for index lookups
    fn apply<'a>(&self, movies: Vec<&'a Movie>, catalog: &'a Catalog) -> Vec<&'a Movie>;
}
