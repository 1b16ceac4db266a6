//! Parser for the catalog data files.
//!
//! Every file is UTF-8 with one `::`-separated record per line:
//! - genres.dat: genreId::name
//! - movies.dat: movieId::title::year::runningTime::Genre|Genre
//! - users.dat: userId::name
//! - ratings.dat: userId::movieId::rating
//!
//! Blank lines are skipped. Any other malformed line is reported with its
//! file name and line number.

use crate::error::{CatalogError, Result};
use crate::types::*;
use std::fs;
use std::path::Path;
use std::str::{FromStr, Split};

pub const GENRES_FILE: &str = "genres.dat";
pub const MOVIES_FILE: &str = "movies.dat";
pub const USERS_FILE: &str = "users.dat";
pub const RATINGS_FILE: &str = "ratings.dat";

const SEPARATOR: &str = "::";

/// A movie as written in movies.dat, before genre names are resolved to ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub year_of_release: i32,
    pub running_time: u32,
    pub genre_names: Vec<String>,
}

/// Cursor over the fields of one record line
struct Fields<'a> {
    file: &'static str,
    line: usize,
    parts: Split<'a, &'static str>,
}

impl<'a> Fields<'a> {
    fn new(file: &'static str, line: usize, text: &'a str) -> Self {
        Self {
            file,
            line,
            parts: text.split(SEPARATOR),
        }
    }

    fn error(&self, reason: String) -> CatalogError {
        CatalogError::ParseError {
            file: self.file.to_string(),
            line: self.line,
            reason,
        }
    }

    fn next(&mut self, name: &str) -> Result<&'a str> {
        self.parts
            .next()
            .ok_or_else(|| self.error(format!("Missing {}", name)))
    }

    fn parse<T>(&mut self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.next(name)?;
        raw.trim()
            .parse()
            .map_err(|e| self.error(format!("Invalid {}: {}", name, e)))
    }
}

/// Read a file and yield (line number, trimmed line) for non-blank lines
fn read_records(path: &Path) -> Result<Vec<(usize, String)>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim().to_string()))
        .filter(|(_, line)| !line.is_empty())
        .collect())
}

pub fn parse_genres(path: &Path) -> Result<Vec<Genre>> {
    let mut genres = Vec::new();
    for (line_no, line) in read_records(path)? {
        let mut fields = Fields::new(GENRES_FILE, line_no, &line);
        genres.push(Genre {
            id: fields.parse("genreId")?,
            name: fields.next("name")?.trim().to_string(),
        });
    }
    Ok(genres)
}

pub fn parse_users(path: &Path) -> Result<Vec<User>> {
    let mut users = Vec::new();
    for (line_no, line) in read_records(path)? {
        let mut fields = Fields::new(USERS_FILE, line_no, &line);
        users.push(User {
            id: fields.parse("userId")?,
            name: fields.next("name")?.trim().to_string(),
        });
    }
    Ok(users)
}

/// Parse the movies.dat file
///
/// Genres are pipe-separated names ("Action|Sci-Fi"); an empty genre field
/// means the movie has no genres.
pub fn parse_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let mut movies = Vec::new();
    for (line_no, line) in read_records(path)? {
        let mut fields = Fields::new(MOVIES_FILE, line_no, &line);
        let id = fields.parse("movieId")?;
        let title = fields.next("title")?.trim().to_string();
        if title.is_empty() {
            return Err(fields.error("Empty title".to_string()));
        }
        let year_of_release = fields.parse("year")?;
        let running_time = fields.parse("runningTime")?;
        let genre_names = parse_genre_names(fields.next("genres")?);

        movies.push(MovieRecord {
            id,
            title,
            year_of_release,
            running_time,
            genre_names,
        });
    }
    Ok(movies)
}

/// Parse the ratings.dat file
///
/// Values outside 1..=5 are rejected here rather than at validation time.
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let mut ratings = Vec::new();
    for (line_no, line) in read_records(path)? {
        let mut fields = Fields::new(RATINGS_FILE, line_no, &line);
        let user_id = fields.parse("userId")?;
        let movie_id = fields.parse("movieId")?;
        let raw: i64 = fields.parse("rating")?;
        let value = RatingValue::new(raw).map_err(|e| fields.error(e.to_string()))?;

        ratings.push(Rating {
            user_id,
            movie_id,
            value,
        });
    }
    Ok(ratings)
}

/// Split "Action|Sci-Fi" into trimmed, non-empty names
fn parse_genre_names(s: &str) -> Vec<String> {
    s.split('|')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render ratings in ratings.dat format, one per line
pub fn format_ratings(ratings: &[Rating]) -> String {
    ratings
        .iter()
        .map(|r| format!("{}{SEPARATOR}{}{SEPARATOR}{}\n", r.user_id, r.movie_id, r.value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_genre_names() {
        assert_eq!(parse_genre_names("Action|Sci-Fi"), vec!["Action", "Sci-Fi"]);
        assert!(parse_genre_names("").is_empty());
    }

    #[test]
    fn test_parse_movies() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            MOVIES_FILE,
            "1::Inception::2010::148::Action|Sci-Fi\n\n2::Documentary Short::2001::12::\n",
        );

        let movies = parse_movies(&path).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "Inception");
        assert_eq!(movies[0].year_of_release, 2010);
        assert_eq!(movies[0].running_time, 148);
        assert_eq!(movies[0].genre_names, vec!["Action", "Sci-Fi"]);
        assert!(movies[1].genre_names.is_empty());
    }

    #[test]
    fn test_parse_movies_reports_line() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, MOVIES_FILE, "1::Inception::2010::148::Action\n2::Broken::soon::90::Drama\n");

        match parse_movies(&path) {
            Err(CatalogError::ParseError { file, line, reason }) => {
                assert_eq!(file, MOVIES_FILE);
                assert_eq!(line, 2);
                assert!(reason.starts_with("Invalid year"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_ratings_rejects_out_of_range() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, RATINGS_FILE, "1::1::5\n1::2::6\n");

        let err = parse_ratings(&path).unwrap_err();
        assert!(matches!(err, CatalogError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_format_ratings() {
        let ratings = vec![Rating {
            user_id: 3,
            movie_id: 7,
            value: RatingValue::new(4).unwrap(),
        }];
        assert_eq!(format_ratings(&ratings), "3::7::4\n");
    }
}
