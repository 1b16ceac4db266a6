//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while loading, validating, or persisting the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error occurred while reading or writing a data file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a data file couldn't be parsed
    ///
    /// Carries the file name and 1-based line number so a bad seed file
    /// can be fixed without guessing.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Rating outside the accepted 1..=5 range
    #[error("Rating must be between 1 and 5 (got {0})")]
    InvalidRating(i64),

    /// Referenced entity doesn't exist (e.g., rating for non-existent movie)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: u32 },

    /// A movie lists a genre name that no genre record carries
    #[error("Unknown genre '{name}' on movie {movie_id}")]
    UnknownGenre { name: String, movie_id: u32 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
