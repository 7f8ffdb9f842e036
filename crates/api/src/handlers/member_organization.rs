use crate::handlers::{api_error, internal_error, ApiError};
use crate::middleware::AuthMember;
use crate::AppState;
use aster_auth::AuthError;
use aster_database::DatabaseError;
use aster_models::{MemberDirectory, Membership, MembershipDecision};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// The caller's directory view: validated organizations, own pending
/// requests, and the pending requests awaiting the caller's decision
pub async fn overview(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
) -> Result<Json<MemberDirectory>, ApiError> {
    let directory = state
        .memberships
        .directory_for_member(member.member_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(directory))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JoinRequest {
    pub organization_id: Uuid,
}

/// Request to join an existing organization. Any existing row for the
/// pair, whatever its status, makes this a conflict.
pub async fn request_join(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
    Json(request): Json<JoinRequest>,
) -> Result<(StatusCode, Json<Membership>), ApiError> {
    let organization = state
        .organizations
        .find_by_id(request.organization_id)
        .await
        .map_err(internal_error)?;

    if organization.is_none() {
        return Err(api_error(StatusCode::NOT_FOUND, "Organization not found"));
    }

    match state
        .memberships
        .request_join(member.member_id, request.organization_id)
        .await
    {
        Ok(membership) => Ok((StatusCode::CREATED, Json(membership))),
        Err(e @ DatabaseError::DuplicateEntry(_)) => {
            tracing::debug!("Join request refused: {}", e);
            Err(api_error(
                StatusCode::CONFLICT,
                "A membership request already exists for this organization",
            ))
        }
        Err(e) => Err(internal_error(e)),
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecideRequest {
    pub status: MembershipDecision,
}

/// Approve or reject a pending membership. Only a validated superadmin of
/// the organization may decide, and only rows still pending qualify.
pub async fn decide(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthMember>,
    Path((organization_id, target_member_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<DecideRequest>,
) -> Result<Json<Membership>, ApiError> {
    match state
        .guard
        .require_superadmin(caller.member_id, organization_id)
        .await
    {
        Ok(()) => {}
        Err(AuthError::Forbidden(_)) => {
            return Err(api_error(StatusCode::FORBIDDEN, "Access denied"));
        }
        Err(e) => return Err(internal_error(e)),
    }

    let updated = state
        .memberships
        .decide(organization_id, target_member_id, request.status.as_status())
        .await
        .map_err(internal_error)?;

    match updated {
        Some(membership) => Ok(Json(membership)),
        None => Err(api_error(
            StatusCode::NOT_FOUND,
            "No pending membership to decide on",
        )),
    }
}
