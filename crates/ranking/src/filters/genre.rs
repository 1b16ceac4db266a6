//! Filter on membership of a named genre.

use crate::traits::MovieFilter;
use catalog::{Catalog, Movie, MovieId};
use std::collections::HashSet;

/// Keeps movies tagged with the genre named exactly `name`.
///
/// An unknown genre name matches nothing.
pub struct GenreFilter {
    name: String,
}

impl GenreFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl MovieFilter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>, catalog: &'a Catalog) -> Vec<&'a Movie> {
        let Some(genre) = catalog.find_genre_by_name(&self.name) else {
            tracing::debug!("Unknown genre '{}', nothing matches", self.name);
            return Vec::new();
        };

        let tagged: HashSet<MovieId> = catalog.get_movies_by_genre(genre.id).iter().copied().collect();

        movies
            .into_iter()
            .filter(|movie| tagged.contains(&movie.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::demo_catalog;

    #[test]
    fn test_genre_filter() {
        let catalog = demo_catalog();

        let mut ids: Vec<MovieId> = GenreFilter::new("Sci-Fi")
            .apply(catalog.movies().collect(), &catalog)
            .iter()
            .map(|m| m.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_genre_filter_is_exact() {
        let catalog = demo_catalog();

        assert!(GenreFilter::new("Comedy").apply(catalog.movies().collect(), &catalog).is_empty());
        assert!(GenreFilter::new("drama").apply(catalog.movies().collect(), &catalog).is_empty());
    }
}
