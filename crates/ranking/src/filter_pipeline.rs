//! The FilterPipeline chains search criteria.
//!
//! A movie survives the pipeline only if every filter keeps it, so the
//! criteria combine with logical AND.

use crate::traits::MovieFilter;
use catalog::{Catalog, Movie};

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(TitleFilter::new("Matrix"))
///     .add_filter(YearFilter::new(1999));
///
/// let movies = pipeline.apply(catalog.movies().collect(), &catalog);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn MovieFilter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl MovieFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the movies.
    ///
    /// An empty pipeline returns its input unchanged. Stops early once no
    /// candidates remain.
    pub fn apply<'a>(&self, movies: Vec<&'a Movie>, catalog: &'a Catalog) -> Vec<&'a Movie> {
        let mut current = movies;
        for filter in &self.filters {
            if current.is_empty() {
                break;
            }
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, catalog);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
