use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role of a member within one organization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MembershipRole {
    Member,
    Superadmin,
}

impl MembershipRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipRole::Member => "member",
            MembershipRole::Superadmin => "superadmin",
        }
    }
}

/// Approval status of a membership. `Validated` and `Rejected` are terminal;
/// no route moves a row out of them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Pending,
    Validated,
    Rejected,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Pending => "pending",
            MembershipStatus::Validated => "validated",
            MembershipStatus::Rejected => "rejected",
        }
    }
}

/// Outcome a superadmin can apply to a pending membership
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MembershipDecision {
    Validated,
    Rejected,
}

impl MembershipDecision {
    pub fn as_status(&self) -> MembershipStatus {
        match self {
            MembershipDecision::Validated => MembershipStatus::Validated,
            MembershipDecision::Rejected => MembershipStatus::Rejected,
        }
    }
}

/// The member/organization relation. At most one row exists per pair,
/// enforced by a UNIQUE constraint on (member_id, organization_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Membership {
    pub member_id: Uuid,
    pub organization_id: Uuid,
    pub role: MembershipRole,
    pub status: MembershipStatus,
    pub created_at: DateTime<Utc>,
}

/// A membership row joined with its organization's name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MembershipWithOrganization {
    pub organization_id: Uuid,
    pub name: String,
    pub role: MembershipRole,
    pub status: MembershipStatus,
}

/// A pending join request awaiting a superadmin's decision, joined with
/// the requesting member's identity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PendingApproval {
    pub organization_id: Uuid,
    pub organization_name: String,
    pub member_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

/// The three partitions of a member's directory view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDirectory {
    /// Organizations the member belongs to (status = validated)
    pub organizations: Vec<MembershipWithOrganization>,
    /// Join requests the member made that are still pending
    pub my_pending: Vec<MembershipWithOrganization>,
    /// Pending requests awaiting the member's decision, in organizations
    /// where the member is a validated superadmin
    pub pending: Vec<PendingApproval>,
}
