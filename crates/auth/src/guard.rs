use crate::error::{AuthError, Result};
use aster_database::MembershipRepository;
use sqlx::PgPool;
use uuid::Uuid;

/// Authorization predicates over current membership state. Re-evaluated on
/// every request; decisions are never cached.
#[derive(Clone)]
pub struct AccessGuard {
    memberships: MembershipRepository,
}

impl AccessGuard {
    pub fn new(pool: PgPool) -> Self {
        Self {
            memberships: MembershipRepository::new(pool),
        }
    }

    /// Require a validated membership (any role) in the organization.
    /// Gates all animal reads and writes.
    pub async fn require_validated_membership(
        &self,
        member_id: Uuid,
        organization_id: Uuid,
    ) -> Result<()> {
        if self
            .memberships
            .has_validated(member_id, organization_id)
            .await?
        {
            Ok(())
        } else {
            Err(AuthError::Forbidden(
                "not a validated member of this organization".to_string(),
            ))
        }
    }

    /// Require a validated superadmin membership in the organization.
    /// Gates membership-approval actions.
    pub async fn require_superadmin(&self, member_id: Uuid, organization_id: Uuid) -> Result<()> {
        if self
            .memberships
            .is_superadmin(member_id, organization_id)
            .await?
        {
            Ok(())
        } else {
            Err(AuthError::Forbidden(
                "requires a validated superadmin membership".to_string(),
            ))
        }
    }
}
