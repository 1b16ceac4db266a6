//! Server crate for the movie ratings API.
//!
//! This crate contains the service layer shared by the HTTP API and the
//! CLI, the axum routes, and the server configuration.

pub mod config;
pub mod error;
pub mod routes;
pub mod service;

pub use config::ServerConfig;
pub use error::{ApiError, ServiceError, ServiceResult};
pub use routes::router;
pub use service::{MovieService, RatingOutcome};
