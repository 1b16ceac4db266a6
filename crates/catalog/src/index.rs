//! Catalog building, aggregation and integrity checks.
//!
//! - Load a data directory into a `Catalog` (files parsed in parallel)
//! - Compute per-movie rating statistics
//! - Validate references between entities
//! - Write ratings back out for persistence

use crate::error::{CatalogError, Result};
use crate::parser::{self, MovieRecord};
use crate::types::*;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

impl Catalog {
    /// Load a catalog from a directory of `.dat` files
    ///
    /// Steps:
    /// 1. Parse the four files in parallel (ratings.dat is optional)
    /// 2. Insert users, genres, movies (resolving genre names to ids)
    /// 3. Upsert ratings, so repeated (user, movie) lines collapse
    /// 4. Validate data integrity
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", data_dir);

        let genres_path = data_dir.join(parser::GENRES_FILE);
        let movies_path = data_dir.join(parser::MOVIES_FILE);
        let users_path = data_dir.join(parser::USERS_FILE);
        let ratings_path = data_dir.join(parser::RATINGS_FILE);

        let ((genres, movies), (users, ratings)) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_genres(&genres_path),
                    || parser::parse_movies(&movies_path),
                )
            },
            || {
                rayon::join(
                    || parser::parse_users(&users_path),
                    || {
                        if ratings_path.exists() {
                            parser::parse_ratings(&ratings_path)
                        } else {
                            Ok(Vec::new())
                        }
                    },
                )
            },
        );

        let genres = genres?;
        let movies = movies?;
        let users = users?;
        let ratings = ratings?;

        let mut catalog = Catalog::new();
        for genre in genres {
            catalog.insert_genre(genre);
        }
        for user in users {
            catalog.insert_user(user);
        }
        for record in movies {
            let movie = catalog.resolve_movie(record)?;
            catalog.insert_movie(movie);
        }
        for rating in ratings {
            catalog.upsert_rating(rating);
        }

        catalog.validate()?;

        let (users, movies, ratings) = catalog.counts();
        info!(
            "Loaded {} users, {} movies, {} genres, {} ratings",
            users,
            movies,
            catalog.genres.len(),
            ratings
        );
        Ok(catalog)
    }

    /// Turn a parsed movie line into a `Movie`, mapping genre names to ids
    fn resolve_movie(&self, record: MovieRecord) -> Result<Movie> {
        let genres = record
            .genre_names
            .iter()
            .map(|name| {
                self.find_genre_by_name(name)
                    .map(|genre| genre.id)
                    .ok_or_else(|| CatalogError::UnknownGenre {
                        name: name.clone(),
                        movie_id: record.id,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Movie {
            id: record.id,
            title: record.title,
            year_of_release: record.year_of_release,
            running_time: record.running_time,
            genres,
        })
    }

    /// Rating statistics for one movie, computed from its current ratings
    pub fn movie_stats(&self, movie_id: MovieId) -> MovieStats {
        compute_stats(self.get_movie_ratings(movie_id))
    }

    /// Rating statistics for every movie, including unrated ones (mean 0)
    pub fn all_movie_stats(&self) -> HashMap<MovieId, MovieStats> {
        self.movies
            .par_iter()
            .map(|(&movie_id, _)| (movie_id, self.movie_stats(movie_id)))
            .collect()
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - every rating references an existing user and movie
    /// - every movie genre id references an existing genre
    pub fn validate(&self) -> Result<()> {
        for ratings in self.user_ratings.values() {
            for rating in ratings {
                if !self.users.contains_key(&rating.user_id) {
                    return Err(CatalogError::MissingReference {
                        entity: "User".to_string(),
                        id: rating.user_id,
                    });
                }
                if !self.movies.contains_key(&rating.movie_id) {
                    return Err(CatalogError::MissingReference {
                        entity: "Movie".to_string(),
                        id: rating.movie_id,
                    });
                }
            }
        }
        for movie in self.movies.values() {
            for genre_id in &movie.genres {
                if !self.genres.contains_key(genre_id) {
                    return Err(CatalogError::MissingReference {
                        entity: "Genre".to_string(),
                        id: *genre_id,
                    });
                }
            }
        }
        Ok(())
    }

    /// Write every rating to `data_dir/ratings.dat`
    ///
    /// The file is written next to the target and renamed over it, so a
    /// crash mid-write never leaves a truncated ratings file behind.
    pub fn save_ratings(&self, data_dir: &Path) -> Result<()> {
        let target = data_dir.join(parser::RATINGS_FILE);
        let staging = data_dir.join(format!("{}.tmp", parser::RATINGS_FILE));

        let ratings = self.all_ratings();
        let written = fs::File::create(&staging)
            .and_then(|mut file| {
                file.write_all(parser::format_ratings(&ratings).as_bytes())?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&staging, &target));

        if let Err(e) = written {
            // Best effort; the staging file may not exist
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }

        debug!("Wrote {} ratings to {:?}", ratings.len(), target);
        Ok(())
    }
}

/// Mean and count over a slice of ratings; the mean of nothing is 0
fn compute_stats(ratings: &[Rating]) -> MovieStats {
    let rating_count = ratings.len() as u32;
    let avg_rating = if rating_count > 0 {
        let total: u32 = ratings.iter().map(|r| u32::from(r.value.get())).sum();
        f64::from(total) / f64::from(rating_count)
    } else {
        0.0
    };

    MovieStats {
        avg_rating,
        rating_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_dataset(dir: &Path, ratings: Option<&str>) {
        fs::write(dir.join(parser::GENRES_FILE), "1::Action\n2::Drama\n").unwrap();
        fs::write(
            dir.join(parser::MOVIES_FILE),
            "10::Heat::1995::170::Action|Drama\n11::Quiet Film::2001::95::Drama\n",
        )
        .unwrap();
        fs::write(dir.join(parser::USERS_FILE), "1::Alice\n2::Bob\n").unwrap();
        if let Some(ratings) = ratings {
            fs::write(dir.join(parser::RATINGS_FILE), ratings).unwrap();
        }
    }

    #[test]
    fn test_compute_stats() {
        let ratings = [
            Rating { user_id: 1, movie_id: 1, value: RatingValue::new(5).unwrap() },
            Rating { user_id: 2, movie_id: 1, value: RatingValue::new(4).unwrap() },
        ];
        let stats = compute_stats(&ratings);
        assert_eq!(stats.rating_count, 2);
        assert!((stats.avg_rating - 4.5).abs() < f64::EPSILON);

        assert_eq!(compute_stats(&[]).avg_rating, 0.0);
    }

    #[test]
    fn test_load_dataset() {
        let dir = TempDir::new().unwrap();
        write_dataset(dir.path(), Some("1::10::5\n2::10::3\n1::10::4\n"));

        let catalog = Catalog::load_from_dir(dir.path()).unwrap();
        assert_eq!(catalog.counts(), (2, 2, 2));

        // Duplicate line for (1, 10) collapses, last value wins
        assert_eq!(catalog.get_rating(1, 10).unwrap().value.get(), 4);
        assert_eq!(catalog.get_movies_by_year(1995), &[10]);

        let drama = catalog.find_genre_by_name("Drama").unwrap().id;
        let mut dramas = catalog.get_movies_by_genre(drama).to_vec();
        dramas.sort();
        assert_eq!(dramas, vec![10, 11]);
    }

    #[test]
    fn test_load_without_ratings_file() {
        let dir = TempDir::new().unwrap();
        write_dataset(dir.path(), None);

        let catalog = Catalog::load_from_dir(dir.path()).unwrap();
        assert_eq!(catalog.counts(), (2, 2, 0));
        assert_eq!(catalog.movie_stats(10).avg_rating, 0.0);
    }

    #[test]
    fn test_load_rejects_dangling_rating() {
        let dir = TempDir::new().unwrap();
        write_dataset(dir.path(), Some("9::10::5\n"));

        let err = Catalog::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingReference { id: 9, .. }));
    }

    #[test]
    fn test_load_rejects_unknown_genre() {
        let dir = TempDir::new().unwrap();
        write_dataset(dir.path(), None);
        fs::write(dir.path().join(parser::MOVIES_FILE), "10::Heat::1995::170::Western\n").unwrap();

        let err = Catalog::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownGenre { movie_id: 10, .. }));
    }

    #[test]
    fn test_save_then_reload() {
        let dir = TempDir::new().unwrap();
        write_dataset(dir.path(), Some("1::10::5\n"));

        let mut catalog = Catalog::load_from_dir(dir.path()).unwrap();
        catalog.upsert_rating(Rating { user_id: 2, movie_id: 11, value: RatingValue::new(2).unwrap() });
        catalog.save_ratings(dir.path()).unwrap();

        let reloaded = Catalog::load_from_dir(dir.path()).unwrap();
        assert_eq!(reloaded.counts(), (2, 2, 2));
        assert_eq!(reloaded.get_rating(2, 11).unwrap().value.get(), 2);
        assert!(!dir.path().join("ratings.dat.tmp").exists());
    }

    #[test]
    fn test_failed_save_removes_staging_file() {
        let dir = TempDir::new().unwrap();
        write_dataset(dir.path(), None);
        let catalog = Catalog::load_from_dir(dir.path()).unwrap();

        // A non-empty directory in place of ratings.dat makes the rename fail
        let blocker = dir.path().join(parser::RATINGS_FILE);
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "").unwrap();

        assert!(catalog.save_ratings(dir.path()).is_err());
        assert!(!dir.path().join("ratings.dat.tmp").exists());
    }

    #[test]
    fn test_load_collapses_repeated_genre_names() {
        let dir = TempDir::new().unwrap();
        write_dataset(dir.path(), None);
        fs::write(dir.path().join(parser::MOVIES_FILE), "10::Heat::1995::170::Action|Action\n").unwrap();

        let catalog = Catalog::load_from_dir(dir.path()).unwrap();
        let heat = catalog.get_movie(10).unwrap();
        assert_eq!(catalog.genre_names(heat), vec!["Action"]);
        assert_eq!(catalog.get_movies_by_genre(1), &[10]);
    }
}
