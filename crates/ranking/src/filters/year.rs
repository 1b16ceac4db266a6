//! Filter on the exact release year.

use crate::traits::MovieFilter;
use catalog::{Catalog, Movie, MovieId};
use std::collections::HashSet;

/// Keeps movies released in exactly `year`.
///
/// ## Algorithm
/// 1. Look up the year bucket in the catalog's year index
/// 2. Keep candidates whose id is in that bucket
pub struct YearFilter {
    year: i32,
}

impl YearFilter {
    pub fn new(year: i32) -> Self {
        Self { year }
    }
}

impl MovieFilter for YearFilter {
    fn name(&self) -> &str {
        "YearFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>, catalog: &'a Catalog) -> Vec<&'a Movie> {
        let released: HashSet<MovieId> = catalog.get_movies_by_year(self.year).iter().copied().collect();

        movies
            .into_iter()
            .filter(|movie| released.contains(&movie.id))
            .collect()
    }
}
