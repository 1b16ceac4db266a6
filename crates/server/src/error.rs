//! Service errors and their HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog::CatalogError;
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Errors returned by `MovieService`
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Out-of-range rating, or a search with no criteria
    #[error("{0}")]
    InvalidArgument(String),

    /// Missing user or movie
    #[error("{0}")]
    NotFound(String),

    /// The store failed to load or commit
    #[error("Storage error: {0}")]
    Storage(#[from] CatalogError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// An error response: status code plus a message for the caller
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidArgument(msg) => Self::bad_request(msg),
            ServiceError::NotFound(msg) => Self::not_found(msg),
            ServiceError::Storage(err) => {
                tracing::error!("Storage failure: {:?}", err);
                Self::internal("Internal Server Error")
            }
        }
    }
}
