use crate::handlers::{api_error, internal_error, ApiError};
use crate::middleware::AuthMember;
use crate::AppState;
use aster_auth::AuthError;
use aster_models::{age_display, Animal, CareStatus, CreateAnimal, UpdateAnimal};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct AnimalsQuery {
    #[serde(rename = "orgId")]
    pub org_id: Uuid,
}

/// Animal row annotated with the derived reminder state. The care flags
/// are computed on every read, never persisted.
#[derive(Debug, Serialize)]
pub struct AnimalWithCare {
    #[serde(flatten)]
    pub animal: Animal,
    pub care: CareStatus,
    pub age: String,
}

/// List the organization's animals, ordered by name, with reminder state
pub async fn list(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
    Query(query): Query<AnimalsQuery>,
) -> Result<Json<Vec<AnimalWithCare>>, ApiError> {
    require_validated(&state, member.member_id, query.org_id).await?;

    let animals = state
        .animals
        .list_by_organization(query.org_id)
        .await
        .map_err(internal_error)?;

    let today = Utc::now().date_naive();
    let annotated = animals
        .into_iter()
        .map(|animal| AnimalWithCare {
            care: animal.care_status(today),
            age: age_display(animal.birth_date, today),
            animal,
        })
        .collect();

    Ok(Json(annotated))
}

#[derive(Debug, Serialize)]
pub struct CreatedAnimal {
    pub id: Uuid,
}

/// Create an animal in an organization the caller is validated in
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
    Json(request): Json<CreateAnimal>,
) -> Result<(StatusCode, Json<CreatedAnimal>), ApiError> {
    if let Err(e) = request.validate() {
        return Err(api_error(StatusCode::BAD_REQUEST, &e.to_string()));
    }
    let record = request
        .record()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, &e.to_string()))?;

    require_validated(&state, member.member_id, request.organization_id).await?;

    let animal = state
        .animals
        .create(request.organization_id, &record)
        .await
        .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(CreatedAnimal { id: animal.id })))
}

/// Update an animal. The owning organization is resolved from the stored
/// record, so a caller cannot assert a different organization. A missing
/// animal answers 404 before any rights check.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
    Path(animal_id): Path<Uuid>,
    Json(request): Json<UpdateAnimal>,
) -> Result<Json<Animal>, ApiError> {
    let existing = state
        .animals
        .find_by_id(animal_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Animal not found"))?;

    require_validated(&state, member.member_id, existing.organization_id).await?;

    if let Err(e) = request.validate() {
        return Err(api_error(StatusCode::BAD_REQUEST, &e.to_string()));
    }
    let record = request
        .record()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, &e.to_string()))?;

    let animal = state
        .animals
        .update(animal_id, &record)
        .await
        .map_err(internal_error)?;

    Ok(Json(animal))
}

async fn require_validated(
    state: &AppState,
    member_id: Uuid,
    organization_id: Uuid,
) -> Result<(), ApiError> {
    match state
        .guard
        .require_validated_membership(member_id, organization_id)
        .await
    {
        Ok(()) => Ok(()),
        Err(AuthError::Forbidden(_)) => Err(api_error(StatusCode::FORBIDDEN, "Access denied")),
        Err(e) => Err(internal_error(e)),
    }
}
