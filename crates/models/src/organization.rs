use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An animal-welfare organization
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Public search hit, annotated with one of the organization's superadmins
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrganizationSearchResult {
    pub id: Uuid,
    pub name: String,
    pub superadmin_first_name: String,
    pub superadmin_last_name: String,
}
