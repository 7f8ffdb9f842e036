use crate::handlers::{api_error, internal_error, ApiError};
use crate::middleware::extract_bearer_token;
use crate::AppState;
use aster_auth::{AuthError, LoginRequest, LoginResponse};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Login with email and password
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    match state.credentials.login(request).await {
        Ok(response) => Ok(Json(response)),
        Err(AuthError::MemberNotFound) => {
            Err(api_error(StatusCode::UNAUTHORIZED, "Member not found"))
        }
        Err(AuthError::InvalidCredentials) => {
            Err(api_error(StatusCode::UNAUTHORIZED, "Incorrect password"))
        }
        Err(AuthError::ValidationError(e)) => Err(api_error(StatusCode::BAD_REQUEST, &e)),
        Err(e) => Err(internal_error(e)),
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub member_id: Uuid,
    pub email: String,
}

/// Check the validity of a bearer token. Unlike the middleware-guarded
/// routes, this endpoint answers 401 for missing and invalid tokens alike.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<VerifyResponse>, ApiError> {
    let token = extract_bearer_token(&headers)
        .map_err(|_| api_error(StatusCode::UNAUTHORIZED, "Missing or invalid token"))?;

    let claims = state
        .credentials
        .verify(&token)
        .map_err(|_| api_error(StatusCode::UNAUTHORIZED, "Invalid or expired token"))?;

    let member_id = claims
        .member_id()
        .map_err(|_| api_error(StatusCode::UNAUTHORIZED, "Invalid or expired token"))?;

    Ok(Json(VerifyResponse {
        member_id,
        email: claims.email,
    }))
}
