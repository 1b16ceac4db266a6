//! HTTP routes for the movies API.
//!
//! | method | path                              | notes                          |
//! |--------|-----------------------------------|--------------------------------|
//! | GET    | /api/movies?title=&year=&genre=   | 400 no criteria, 404 no match  |
//! | GET    | /api/movies/top-rated             | up to 5 movies                 |
//! | GET    | /api/movies/top-rated/{userId}    | 404 when the user rated nothing |
//! | POST   | /api/movies/rate?userId=&movieId=&rating= | 400 bad rating, 404 unknown ids |

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use catalog::UserId;
use ranking::{MovieQuery, MovieSummary};

use crate::error::ApiError;
use crate::service::{MovieService, RatingOutcome};

pub fn router(service: MovieService) -> Router {
    Router::new()
        .route("/api/movies", get(filter_movies))
        .route("/api/movies/top-rated", get(top_rated))
        .route("/api/movies/top-rated/{user_id}", get(top_rated_by_user))
        .route("/api/movies/rate", post(rate_movie))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn filter_movies(
    State(service): State<MovieService>,
    Query(query): Query<MovieQuery>,
) -> Result<Json<Vec<MovieSummary>>, ApiError> {
    let movies = service.filter_movies(&query)?;
    if movies.is_empty() {
        return Err(ApiError::not_found("No movies match the given criteria"));
    }
    Ok(Json(movies))
}

async fn top_rated(State(service): State<MovieService>) -> Json<Vec<MovieSummary>> {
    Json(service.top_rated())
}

async fn top_rated_by_user(
    State(service): State<MovieService>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<MovieSummary>>, ApiError> {
    // Ids outside the UserId range can't have ratings
    let movies = UserId::try_from(user_id)
        .map(|id| service.top_rated_by_user(id))
        .unwrap_or_default();

    if movies.is_empty() {
        return Err(ApiError::not_found(format!(
            "No rated movies found for user {}",
            user_id
        )));
    }
    Ok(Json(movies))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateParams {
    user_id: i64,
    movie_id: i64,
    rating: i64,
}

async fn rate_movie(
    State(service): State<MovieService>,
    Query(params): Query<RateParams>,
) -> Result<Json<RatingOutcome>, ApiError> {
    // Commit may write to disk; keep it off the async workers
    let outcome = tokio::task::spawn_blocking(move || {
        service.rate_movie(params.user_id, params.movie_id, params.rating)
    })
    .await
    .map_err(|e| {
        tracing::error!("Rate task failed: {:?}", e);
        ApiError::internal("Internal Server Error")
    })??;

    Ok(Json(outcome))
}
