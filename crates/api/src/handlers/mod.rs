pub mod animals;
pub mod health;
pub mod member_organization;
pub mod members;
pub mod organizations;
pub mod sessions;

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Error body returned on every failure: `{ "error": "<message>" }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(ErrorResponse::new(message)))
}

/// Store failures are logged server-side and reported as an opaque 500;
/// internals never reach the client.
pub fn internal_error<E: std::fmt::Display>(err: E) -> ApiError {
    tracing::error!("Internal error: {}", err);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
