use crate::handlers::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

/// Authenticated member context, inserted into request extensions by
/// `require_auth`
#[derive(Debug, Clone)]
pub struct AuthMember {
    pub member_id: Uuid,
    pub email: String,
}

/// Extract the bearer token from the Authorization header.
/// A missing or malformed header is an authentication error (401).
pub fn extract_bearer_token(
    headers: &HeaderMap,
) -> Result<String, (StatusCode, Json<ErrorResponse>)> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Missing token")),
            )
        })?
        .to_str()
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Invalid Authorization header")),
            )
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new(
                    "Authorization header must use Bearer scheme",
                )),
            )
        })?;

    Ok(token.to_string())
}

/// Middleware gating all member-scoped routes. Verifies the token before
/// any data operation runs; a bad signature or expired token is refused
/// with 403, a missing one with 401.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let token = extract_bearer_token(&headers)?;

    let claims = state.credentials.verify(&token).map_err(|e| {
        tracing::debug!("Token validation failed: {}", e);
        (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new("Invalid or expired token")),
        )
    })?;

    let member_id = claims.member_id().map_err(|_| {
        (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new("Invalid or expired token")),
        )
    })?;

    request.extensions_mut().insert(AuthMember {
        member_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def");
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let headers = HeaderMap::new();
        let (status, _) = extract_bearer_token(&headers).unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_non_bearer_scheme_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcg=="));
        let (status, _) = extract_bearer_token(&headers).unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
