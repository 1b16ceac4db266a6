//! Movie search by title, year and genre.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{GenreFilter, TitleFilter, YearFilter};
use crate::summary::MovieSummary;
use catalog::{Catalog, Movie};
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// Optional search criteria. Absent criteria don't filter.
///
/// Deserializes from query strings like `?title=&year=1999`, where an
/// empty or blank value counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MovieQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub genre: Option<String>,
}

impl MovieQuery {
    /// True when no criterion is given
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.year.is_none() && self.genre.is_none()
    }

    /// Trim text criteria and drop the blank ones, matching how query-string
    /// values deserialize
    pub fn without_blanks(self) -> Self {
        let keep = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            title: keep(self.title),
            year: self.year,
            genre: keep(self.genre),
        }
    }

    /// Build the filter pipeline for the given criteria
    pub fn pipeline(&self) -> FilterPipeline {
        let mut pipeline = FilterPipeline::new();
        if let Some(title) = &self.title {
            pipeline = pipeline.add_filter(TitleFilter::new(title));
        }
        if let Some(year) = self.year {
            pipeline = pipeline.add_filter(YearFilter::new(year));
        }
        if let Some(genre) = &self.genre {
            pipeline = pipeline.add_filter(GenreFilter::new(genre.clone()));
        }
        pipeline
    }
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Movies matching every criterion of `query`, ordered by id.
///
/// Callers reject an empty query before getting here; if one does arrive,
/// nothing is filtered out.
pub fn filter_movies(catalog: &Catalog, query: &MovieQuery) -> Vec<MovieSummary> {
    let mut movies: Vec<&Movie> = catalog.movies().collect();
    movies.sort_by_key(|movie| movie.id);

    query
        .pipeline()
        .apply(movies, catalog)
        .into_iter()
        .map(|movie| MovieSummary::with_overall_average(catalog, movie))
        .collect()
}
