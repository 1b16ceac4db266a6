//! Top-rated rankings, globally and per user.
//!
//! Both rankings sort by score descending and break ties by title
//! ascending, then keep the first `limit` movies. They differ in the score:
//!
//! - global: the unrounded mean of all of a movie's ratings (0 if unrated)
//! - per user: the best rating that user gave the movie
//!
//! Either way the emitted `average_rating` is the movie's overall average,
//! rounded to the nearest 0.5.

use crate::summary::MovieSummary;
use catalog::{Catalog, Movie, MovieId, Rating, RatingValue, UserId};
use std::collections::HashMap;
use tracing::debug;

/// How many movies the top-rated endpoints return
pub const TOP_RATED_LIMIT: usize = 5;

/// The `limit` movies with the highest average rating.
pub fn top_rated(catalog: &Catalog, limit: usize) -> Vec<MovieSummary> {
    let stats = catalog.all_movie_stats();

    let scored: Vec<(&Movie, f64)> = stats
        .iter()
        .filter_map(|(id, stats)| catalog.get_movie(*id).map(|movie| (movie, stats.avg_rating)))
        .collect();

    let ranked = rank(scored, limit);
    debug!("Ranked top {} of {} movies", ranked.len(), stats.len());

    ranked
        .into_iter()
        .map(|(movie, average)| MovieSummary::new(catalog, movie, average))
        .collect()
}

/// The `limit` movies `user_id` rated highest.
///
/// A user with no ratings, or an unknown user, yields an empty list.
pub fn top_rated_by_user(catalog: &Catalog, user_id: UserId, limit: usize) -> Vec<MovieSummary> {
    let best = best_rating_per_movie(catalog.get_user_ratings(user_id));

    let scored: Vec<(&Movie, f64)> = best
        .iter()
        .filter_map(|(id, value)| {
            catalog
                .get_movie(*id)
                .map(|movie| (movie, f64::from(value.get())))
        })
        .collect();

    let ranked = rank(scored, limit);
    debug!(
        "Ranked top {} of {} movies rated by user {}",
        ranked.len(),
        best.len(),
        user_id
    );

    ranked
        .into_iter()
        .map(|(movie, _)| MovieSummary::with_overall_average(catalog, movie))
        .collect()
}

/// Group ratings by movie, keeping the highest value for each.
///
/// The catalog stores one rating per (user, movie), so for a single user
/// this is just that rating; the max only matters for input that repeats
/// a movie.
pub fn best_rating_per_movie(ratings: &[Rating]) -> HashMap<MovieId, RatingValue> {
    let mut best: HashMap<MovieId, RatingValue> = HashMap::new();
    for rating in ratings {
        best.entry(rating.movie_id)
            .and_modify(|value| *value = (*value).max(rating.value))
            .or_insert(rating.value);
    }
    best
}

/// Sort by score descending, title ascending, then id; keep the first `limit`.
fn rank(mut scored: Vec<(&Movie, f64)>, limit: usize) -> Vec<(&Movie, f64)> {
    scored.sort_by(|(a, a_score), (b, b_score)| {
        b_score
            .total_cmp(a_score)
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.id.cmp(&b.id))
    });
    scored.truncate(limit);
    scored
}
