//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache engine and its admin surface.
///
/// Lookups never produce an error for a missing key; absence is `None`.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No cache domain with the given name
    #[error("Unknown cache domain: {0}")]
    UnknownDomain(String),

    /// Payload could not be serialized or compressed
    #[error("Encode failed: {0}")]
    Encode(String),

    /// Stored payload could not be decompressed or deserialized
    #[error("Decode failed: {0}")]
    Decode(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::UnknownDomain(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Encode(_) | CacheError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
