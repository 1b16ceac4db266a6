//! Filter implementations for movie search.
//!
//! Each search criterion is one filter; a FilterPipeline composes them.

pub mod genre;
pub mod title;
pub mod year;

// Re-export for convenience
pub use genre::GenreFilter;
pub use title::TitleFilter;
pub use year::YearFilter;
