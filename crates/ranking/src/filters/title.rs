//! Filter on a title substring.

use crate::traits::MovieFilter;
use catalog::{Catalog, Movie};

/// Keeps movies whose title contains the needle, ignoring case.
pub struct TitleFilter {
    needle: String,
}

impl TitleFilter {
    pub fn new(needle: impl AsRef<str>) -> Self {
        Self {
            needle: needle.as_ref().to_lowercase(),
        }
    }
}

impl MovieFilter for TitleFilter {
    fn name(&self) -> &str {
        "TitleFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>, _catalog: &'a Catalog) -> Vec<&'a Movie> {
        movies
            .into_iter()
            .filter(|movie| movie.title.to_lowercase().contains(&self.needle))
            .collect()
    }
}
