use crate::handlers::{api_error, internal_error, ApiError};
use crate::AppState;
use aster_auth::{AuthError, RegisterRequest, RegisterResponse};
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

/// Register a new member. Returns a session token so the frontend can
/// log the member in straight away.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    match state.credentials.register(request).await {
        Ok(response) => Ok((StatusCode::CREATED, Json(response))),
        // Duplicate identity deliberately keeps the historical 400, not 409
        Err(AuthError::DuplicateIdentity) => Err(api_error(
            StatusCode::BAD_REQUEST,
            "An account already exists with this email or phone number",
        )),
        Err(AuthError::ValidationError(e)) => Err(api_error(StatusCode::BAD_REQUEST, &e)),
        Err(e) => Err(internal_error(e)),
    }
}
