//! The movie view returned by filtering and ranking.

use crate::rounding::round_to_nearest_half;
use catalog::{Catalog, Movie, MovieId};
use serde::{Deserialize, Serialize};

/// A movie as callers see it: its attributes, genre names, and the
/// average rating rounded to the nearest 0.5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub year_of_release: i32,
    pub running_time: u32,
    pub genres: Vec<String>,
    pub average_rating: f64,
}

impl MovieSummary {
    /// Build a summary from an unrounded average
    pub fn new(catalog: &Catalog, movie: &Movie, average: f64) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            year_of_release: movie.year_of_release,
            running_time: movie.running_time,
            genres: catalog.genre_names(movie),
            average_rating: round_to_nearest_half(average),
        }
    }

    /// Build a summary using the movie's overall average across all users
    pub fn with_overall_average(catalog: &Catalog, movie: &Movie) -> Self {
        Self::new(catalog, movie, catalog.movie_stats(movie.id).avg_rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::demo_catalog;

    #[test]
    fn test_summary_serializes_camel_case() {
        let catalog = demo_catalog();
        let inception = catalog.get_movie(1).unwrap();
        let summary = MovieSummary::with_overall_average(&catalog, inception);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["title"], "Inception");
        assert_eq!(json["yearOfRelease"], 2010);
        assert_eq!(json["runningTime"], 148);
        assert_eq!(json["genres"], serde_json::json!(["Action", "Sci-Fi"]));
        assert_eq!(json["averageRating"], 4.5);
    }
}
