//! # Movie Service
//!
//! The service layer between the HTTP handlers (or the CLI) and the
//! catalog store:
//! 1. Validate caller input
//! 2. Take the right lock on the store
//! 3. Run the filter / ranking / upsert
//! 4. Commit writes
//!
//! Read paths return empty lists rather than errors when nothing matches;
//! deciding whether "empty" is a 404 is the HTTP layer's call.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use catalog::{CatalogStore, MovieId, Rating, RatingChange, RatingValue, UserId};
use ranking::{MovieQuery, MovieSummary, TOP_RATED_LIMIT};

use crate::error::{ServiceError, ServiceResult};

/// Result of a successful rate call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingOutcome {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: RatingValue,
    /// False when an existing rating was overwritten
    pub created: bool,
    pub previous_rating: Option<RatingValue>,
}

/// Cheap to clone; clones share the same store
#[derive(Debug, Clone)]
pub struct MovieService {
    store: Arc<CatalogStore>,
}

impl MovieService {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Movies matching every given criterion.
    ///
    /// At least one of title, year, genre must be given.
    pub fn filter_movies(&self, query: &MovieQuery) -> ServiceResult<Vec<MovieSummary>> {
        let query = query.clone().without_blanks();
        if query.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "At least one of title, year or genre must be provided".to_string(),
            ));
        }

        let catalog = self.store.read();
        let movies = ranking::filter_movies(&catalog, &query);
        debug!("Filter {:?} matched {} movies", query, movies.len());
        Ok(movies)
    }

    /// Up to five movies with the highest average rating
    pub fn top_rated(&self) -> Vec<MovieSummary> {
        let start = Instant::now();
        let catalog = self.store.read();
        let movies = ranking::top_rated(&catalog, TOP_RATED_LIMIT);
        debug!("Computed top rated in {:.2?}", start.elapsed());
        movies
    }

    /// Up to five movies the user rated highest; empty for unknown users
    pub fn top_rated_by_user(&self, user_id: UserId) -> Vec<MovieSummary> {
        let catalog = self.store.read();
        ranking::top_rated_by_user(&catalog, user_id, TOP_RATED_LIMIT)
    }

    /// Create or overwrite the rating `user_id` gives `movie_id`.
    ///
    /// Ids are taken as received from the caller; ids that cannot name a
    /// record (e.g. negative) are reported as not found. The rating is
    /// checked before anything is looked up.
    pub fn rate_movie(&self, user_id: i64, movie_id: i64, rating: i64) -> ServiceResult<RatingOutcome> {
        let value = RatingValue::new(rating)
            .map_err(|e| ServiceError::InvalidArgument(e.to_string()))?;

        let mut catalog = self.store.write();

        let user_id = UserId::try_from(user_id)
            .ok()
            .filter(|id| catalog.get_user(*id).is_some())
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user_id)))?;
        let movie_id = MovieId::try_from(movie_id)
            .ok()
            .filter(|id| catalog.get_movie(*id).is_some())
            .ok_or_else(|| ServiceError::NotFound(format!("Movie {} not found", movie_id)))?;

        let rating = Rating {
            user_id,
            movie_id,
            value,
        };
        let change = catalog.upsert_rating(rating);
        if let Err(e) = self.store.commit(&catalog) {
            // Keep memory in line with what was last saved
            catalog.revert_rating(rating, change);
            return Err(e.into());
        }

        info!(
            "User {} rated movie {} with {} ({:?})",
            user_id, movie_id, value, change
        );

        Ok(RatingOutcome {
            user_id,
            movie_id,
            rating: value,
            created: change == RatingChange::Created,
            previous_rating: match change {
                RatingChange::Created => None,
                RatingChange::Updated { previous } => Some(previous),
            },
        })
    }
}
