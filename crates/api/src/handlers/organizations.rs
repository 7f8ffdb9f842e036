use crate::handlers::{api_error, internal_error, ApiError};
use crate::middleware::AuthMember;
use crate::AppState;
use aster_database::DatabaseError;
use aster_models::{Organization, OrganizationSearchResult};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Public organization search by name. Not authorization-gated.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<OrganizationSearchResult>>, ApiError> {
    let term = query.q.unwrap_or_default();
    if term.chars().count() < 2 {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Search term must be at least 2 characters",
        ));
    }

    let results = state
        .organizations
        .search(&term)
        .await
        .map_err(internal_error)?;

    Ok(Json(results))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateOrganizationRequest {
    #[validate(length(min = 1))]
    pub name: String,
}

/// Create an organization; the caller becomes its validated superadmin
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
    Json(request): Json<CreateOrganizationRequest>,
) -> Result<(StatusCode, Json<Organization>), ApiError> {
    if let Err(e) = request.validate() {
        return Err(api_error(StatusCode::BAD_REQUEST, &e.to_string()));
    }

    match state
        .organizations
        .create_with_founder(member.member_id, &request.name)
        .await
    {
        Ok(organization) => Ok((StatusCode::CREATED, Json(organization))),
        Err(DatabaseError::InvalidInput(e)) => Err(api_error(StatusCode::BAD_REQUEST, &e)),
        Err(e) => Err(internal_error(e)),
    }
}
