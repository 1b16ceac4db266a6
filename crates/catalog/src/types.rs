//! Core domain types for the movie catalog.
//!
//! This module defines the entities the API serves (users, movies, genres,
//! ratings) and the `Catalog` that owns them together with the lookup
//! indices used by filtering and ranking.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

/// Unique identifier for a genre
pub type GenreId = u32;

// =============================================================================
// Entities
// =============================================================================

/// A user who can rate movies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

/// A genre tag. Movies and genres are many-to-many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Represents a movie in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year_of_release: i32,
    /// Running time in minutes
    pub running_time: u32,
    /// Ids of the genres this movie is tagged with
    pub genres: Vec<GenreId>,
}

// =============================================================================
// Rating Types
// =============================================================================

/// A rating value, guaranteed to lie in `1..=5`.
///
/// The only way to build one is through [`RatingValue::new`] (or the
/// matching `TryFrom`), so an out-of-range value never reaches the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct RatingValue(pub(crate) u8);

impl RatingValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a raw rating.
    pub fn new(value: i64) -> Result<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(CatalogError::InvalidRating(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for RatingValue {
    type Error = CatalogError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<RatingValue> for u8 {
    fn from(value: RatingValue) -> Self {
        value.0
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single rating from a user for a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub value: RatingValue,
}

/// What an upsert did to the stored rating for a (user, movie) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingChange {
    Created,
    Updated { previous: RatingValue },
}

/// Aggregate statistics for a movie, computed from its current ratings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovieStats {
    /// Unrounded mean of all ratings, 0 when the movie has none
    pub avg_rating: f64,
    pub rating_count: u32,
}

// =============================================================================
// Catalog - The In-Memory Entity Store
// =============================================================================

/// Main data structure that holds all entities and indices.
///
/// Ratings are kept twice, grouped by user and grouped by movie, so both
/// "what did this user rate" and "how is this movie rated" are single
/// lookups. `upsert_rating` keeps the two views in sync and guarantees at
/// most one rating per (user, movie) pair.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    // Primary data stores
    pub(crate) users: HashMap<UserId, User>,
    pub(crate) movies: HashMap<MovieId, Movie>,
    pub(crate) genres: HashMap<GenreId, Genre>,

    // Rating indices
    pub(crate) user_ratings: HashMap<UserId, Vec<Rating>>,
    pub(crate) movie_ratings: HashMap<MovieId, Vec<Rating>>,

    // Secondary indices
    /// Movies grouped by genre (one movie can appear in multiple genre lists)
    pub(crate) genre_index: HashMap<GenreId, Vec<MovieId>>,
    /// Movies grouped by release year
    pub(crate) year_index: BTreeMap<i32, Vec<MovieId>>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    pub fn get_genre(&self, id: GenreId) -> Option<&Genre> {
        self.genres.get(&id)
    }

    /// Look up a genre by its exact name
    pub fn find_genre_by_name(&self, name: &str) -> Option<&Genre> {
        self.genres.values().find(|genre| genre.name == name)
    }

    /// Iterate over every movie, in no particular order
    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.movies.values()
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Get all ratings made by a user
    ///
    /// Returns an empty slice if the user has no ratings or doesn't exist
    pub fn get_user_ratings(&self, user_id: UserId) -> &[Rating] {
        self.user_ratings
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all ratings for a movie
    pub fn get_movie_ratings(&self, movie_id: MovieId) -> &[Rating] {
        self.movie_ratings
            .get(&movie_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get the rating a user gave a movie, if any
    pub fn get_rating(&self, user_id: UserId, movie_id: MovieId) -> Option<&Rating> {
        self.get_user_ratings(user_id)
            .iter()
            .find(|rating| rating.movie_id == movie_id)
    }

    /// Get all movies tagged with a genre
    pub fn get_movies_by_genre(&self, genre_id: GenreId) -> &[MovieId] {
        self.genre_index
            .get(&genre_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all movies released in a specific year
    pub fn get_movies_by_year(&self, year: i32) -> &[MovieId] {
        self.year_index
            .get(&year)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve a movie's genre ids to names, skipping dangling ids
    pub fn genre_names(&self, movie: &Movie) -> Vec<String> {
        movie
            .genres
            .iter()
            .filter_map(|id| self.genres.get(id))
            .map(|genre| genre.name.clone())
            .collect()
    }

    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn insert_genre(&mut self, genre: Genre) {
        self.genres.insert(genre.id, genre);
    }

    /// Insert a movie and index it by genre and year.
    ///
    /// Replacing an existing movie drops it from the old index entries first.
    /// Repeated genre ids are collapsed to one.
    pub fn insert_movie(&mut self, mut movie: Movie) {
        let mut seen = HashSet::new();
        movie.genres.retain(|id| seen.insert(*id));

        if let Some(old) = self.movies.remove(&movie.id) {
            self.unindex_movie(&old);
        }

        for &genre_id in &movie.genres {
            self.genre_index.entry(genre_id).or_default().push(movie.id);
        }
        self.year_index
            .entry(movie.year_of_release)
            .or_default()
            .push(movie.id);

        self.movies.insert(movie.id, movie);
    }

    fn unindex_movie(&mut self, movie: &Movie) {
        for genre_id in &movie.genres {
            if let Some(ids) = self.genre_index.get_mut(genre_id) {
                ids.retain(|id| *id != movie.id);
            }
        }
        if let Some(ids) = self.year_index.get_mut(&movie.year_of_release) {
            ids.retain(|id| *id != movie.id);
        }
    }

    /// Insert or overwrite the rating for `(rating.user_id, rating.movie_id)`.
    ///
    /// Does not check that the user or movie exist; callers validate that
    /// first (see `validate` for bulk loads).
    pub fn upsert_rating(&mut self, rating: Rating) -> RatingChange {
        let by_user = self.user_ratings.entry(rating.user_id).or_default();
        let position = by_user.iter().position(|r| r.movie_id == rating.movie_id);

        match position {
            Some(index) => {
                let previous = by_user[index].value;
                by_user[index].value = rating.value;

                let by_movie = self.movie_ratings.entry(rating.movie_id).or_default();
                match by_movie.iter_mut().find(|r| r.user_id == rating.user_id) {
                    Some(mirror) => mirror.value = rating.value,
                    None => by_movie.push(rating),
                }
                RatingChange::Updated { previous }
            }
            None => {
                by_user.push(rating);
                self.movie_ratings
                    .entry(rating.movie_id)
                    .or_default()
                    .push(rating);
                RatingChange::Created
            }
        }
    }

    /// Remove the rating for a (user, movie) pair from both views
    pub fn remove_rating(&mut self, user_id: UserId, movie_id: MovieId) -> Option<Rating> {
        if let Some(ratings) = self.movie_ratings.get_mut(&movie_id) {
            ratings.retain(|r| r.user_id != user_id);
        }
        let by_user = self.user_ratings.get_mut(&user_id)?;
        let index = by_user.iter().position(|r| r.movie_id == movie_id)?;
        Some(by_user.remove(index))
    }

    /// Undo an `upsert_rating` of `rating` that reported `change`.
    pub fn revert_rating(&mut self, rating: Rating, change: RatingChange) {
        match change {
            RatingChange::Created => {
                self.remove_rating(rating.user_id, rating.movie_id);
            }
            RatingChange::Updated { previous } => {
                self.upsert_rating(Rating {
                    value: previous,
                    ..rating
                });
            }
        }
    }

    /// Every stored rating, ordered by (user, movie)
    pub fn all_ratings(&self) -> Vec<Rating> {
        let mut ratings: Vec<Rating> = self.user_ratings.values().flatten().copied().collect();
        ratings.sort_by_key(|r| (r.user_id, r.movie_id));
        ratings
    }

    /// True when no movies have been loaded
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Get (users, movies, ratings) counts for logging/validation
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_ratings = self.user_ratings.values().map(|v| v.len()).sum();
        (self.users.len(), self.movies.len(), total_ratings)
    }
}
