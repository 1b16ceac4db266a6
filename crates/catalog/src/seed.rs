//! Built-in demo data, used when no data directory is configured.

use crate::types::*;
use tracing::info;

/// (id, name)
const GENRES: &[(GenreId, &str)] = &[(1, "Action"), (2, "Drama"), (3, "Sci-Fi"), (4, "Crime")];

/// (id, title, year, running time, genre ids)
const MOVIES: &[(MovieId, &str, i32, u32, &[GenreId])] = &[
    (1, "Inception", 2010, 148, &[1, 3]),
    (2, "The Godfather", 1972, 175, &[2, 4]),
    (3, "The Matrix", 1999, 136, &[1, 3]),
];

const USERS: &[(UserId, &str)] = &[(1, "Alice"), (2, "Bob")];

/// (user, movie, value)
const RATINGS: &[(UserId, MovieId, u8)] = &[(1, 1, 5), (2, 1, 4), (1, 2, 5), (2, 2, 5), (1, 3, 4)];

/// Build a fresh catalog holding the demo data set
pub fn demo_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.seed_if_empty();
    catalog
}

impl Catalog {
    /// Populate the demo data set, but only when the catalog has no movies.
    ///
    /// Returns true if anything was seeded.
    pub fn seed_if_empty(&mut self) -> bool {
        if !self.is_empty() {
            return false;
        }

        for &(id, name) in GENRES {
            self.insert_genre(Genre {
                id,
                name: name.to_string(),
            });
        }
        for &(id, title, year_of_release, running_time, genres) in MOVIES {
            self.insert_movie(Movie {
                id,
                title: title.to_string(),
                year_of_release,
                running_time,
                genres: genres.to_vec(),
            });
        }
        for &(id, name) in USERS {
            self.insert_user(User {
                id,
                name: name.to_string(),
            });
        }
        for &(user_id, movie_id, value) in RATINGS {
            self.upsert_rating(Rating {
                user_id,
                movie_id,
                value: RatingValue(value),
            });
        }

        info!("Seeded demo catalog");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_is_consistent() {
        let catalog = demo_catalog();
        assert_eq!(catalog.counts(), (2, 3, 5));
        assert!(catalog.validate().is_ok());

        let godfather = catalog.get_movie(2).unwrap();
        assert_eq!(catalog.genre_names(godfather), vec!["Drama", "Crime"]);
    }

    #[test]
    fn test_seed_only_when_empty() {
        let mut catalog = demo_catalog();
        assert!(!catalog.seed_if_empty());
        assert_eq!(catalog.counts(), (2, 3, 5));
    }
}
