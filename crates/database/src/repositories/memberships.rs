use crate::error::{DatabaseError, Result};
use aster_models::{
    MemberDirectory, Membership, MembershipRole, MembershipStatus, MembershipWithOrganization,
    PendingApproval,
};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the membership row for a (member, organization) pair
    pub async fn find(&self, member_id: Uuid, organization_id: Uuid) -> Result<Option<Membership>> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            SELECT member_id, organization_id, role, status, created_at
            FROM member_organization
            WHERE member_id = $1 AND organization_id = $2
            "#,
        )
        .bind(member_id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(membership)
    }

    /// Whether the member holds a validated membership (any role)
    pub async fn has_validated(&self, member_id: Uuid, organization_id: Uuid) -> Result<bool> {
        let validated: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM member_organization
                WHERE member_id = $1 AND organization_id = $2 AND status = 'validated'
            )
            "#,
        )
        .bind(member_id)
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(validated)
    }

    /// Whether the member is a validated superadmin of the organization
    pub async fn is_superadmin(&self, member_id: Uuid, organization_id: Uuid) -> Result<bool> {
        let superadmin: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM member_organization
                WHERE member_id = $1 AND organization_id = $2
                  AND role = 'superadmin' AND status = 'validated'
            )
            "#,
        )
        .bind(member_id)
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(superadmin)
    }

    /// File a join request. A row in any status blocks a new one: a
    /// rejected member cannot re-request without external intervention.
    /// The pair UNIQUE constraint closes the race between two concurrent
    /// requests for the same pair.
    pub async fn request_join(&self, member_id: Uuid, organization_id: Uuid) -> Result<Membership> {
        if self.find(member_id, organization_id).await?.is_some() {
            return Err(DatabaseError::duplicate("Membership", "this organization"));
        }

        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO member_organization (member_id, organization_id, role, status)
            VALUES ($1, $2, $3, $4)
            RETURNING member_id, organization_id, role, status, created_at
            "#,
        )
        .bind(member_id)
        .bind(organization_id)
        .bind(MembershipRole::Member)
        .bind(MembershipStatus::Pending)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DatabaseError::duplicate("Membership", "this organization")
            }
            _ => e.into(),
        })?;

        Ok(membership)
    }

    /// All membership rows of a member joined with organization names,
    /// ordered by organization name
    pub async fn list_for_member(
        &self,
        member_id: Uuid,
    ) -> Result<Vec<MembershipWithOrganization>> {
        let memberships = sqlx::query_as::<_, MembershipWithOrganization>(
            r#"
            SELECT mo.organization_id, o.name, mo.role, mo.status
            FROM member_organization mo
            INNER JOIN organizations o ON mo.organization_id = o.id
            WHERE mo.member_id = $1
            ORDER BY o.name ASC
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(memberships)
    }

    /// Pending join requests in every organization where the given member
    /// is a validated superadmin, ordered by organization name then the
    /// requester's last name
    pub async fn list_pending_approvals(&self, admin_id: Uuid) -> Result<Vec<PendingApproval>> {
        let approvals = sqlx::query_as::<_, PendingApproval>(
            r#"
            SELECT
                pm.organization_id,
                o.name AS organization_name,
                m.id AS member_id,
                m.first_name,
                m.last_name,
                m.email,
                m.phone_number
            FROM member_organization pm
            INNER JOIN members m ON m.id = pm.member_id
            INNER JOIN organizations o ON o.id = pm.organization_id
            WHERE pm.status = 'pending'
              AND pm.organization_id IN (
                  SELECT organization_id FROM member_organization
                  WHERE member_id = $1 AND role = 'superadmin' AND status = 'validated'
              )
            ORDER BY o.name ASC, m.last_name ASC
            "#,
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(approvals)
    }

    /// The member's directory view: validated organizations, own pending
    /// requests, and requests awaiting the member's decision
    pub async fn directory_for_member(&self, member_id: Uuid) -> Result<MemberDirectory> {
        let rows = self.list_for_member(member_id).await?;

        let (organizations, my_pending): (Vec<_>, Vec<_>) = rows
            .into_iter()
            .filter(|row| row.status != MembershipStatus::Rejected)
            .partition(|row| row.status == MembershipStatus::Validated);

        let pending = self.list_pending_approvals(member_id).await?;

        Ok(MemberDirectory {
            organizations,
            my_pending,
            pending,
        })
    }

    /// Apply a superadmin's decision to a pending row. The status guard in
    /// the UPDATE makes decisions single-shot: once a row left `pending`,
    /// the same call returns None.
    pub async fn decide(
        &self,
        organization_id: Uuid,
        target_member_id: Uuid,
        status: MembershipStatus,
    ) -> Result<Option<Membership>> {
        let updated = sqlx::query_as::<_, Membership>(
            r#"
            UPDATE member_organization
            SET status = $1
            WHERE organization_id = $2 AND member_id = $3 AND status = 'pending'
            RETURNING member_id, organization_id, role, status, created_at
            "#,
        )
        .bind(status)
        .bind(organization_id)
        .bind(target_member_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{Database, DatabaseConfig};
    use crate::repositories::members::MemberRepository;
    use crate::repositories::organizations::OrganizationRepository;
    use aster_models::NewMember;

    async fn test_db() -> Database {
        Database::new(DatabaseConfig::from_env())
            .await
            .expect("Failed to connect to database")
    }

    async fn create_member(db: &Database, tag: &str) -> Uuid {
        let unique = Uuid::new_v4();
        let member = MemberRepository::new(db.pool().clone())
            .create(
                &NewMember {
                    first_name: tag.to_string(),
                    last_name: "Test".to_string(),
                    email: format!("{}-{}@example.com", tag, unique),
                    phone_number: format!("+33{}", &unique.simple().to_string()[..9]),
                },
                "$argon2id$test-hash",
            )
            .await
            .expect("Failed to create member");
        member.id
    }

    #[tokio::test]
    #[ignore] // Only run with database available
    async fn test_second_join_request_conflicts() {
        let db = test_db().await;
        let memberships = MembershipRepository::new(db.pool().clone());
        let organizations = OrganizationRepository::new(db.pool().clone());

        let founder = create_member(&db, "founder").await;
        let joiner = create_member(&db, "joiner").await;
        let org = organizations
            .create_with_founder(founder, &format!("shelter-{}", Uuid::new_v4()))
            .await
            .unwrap();

        memberships.request_join(joiner, org.id).await.unwrap();
        let second = memberships.request_join(joiner, org.id).await;
        assert!(matches!(second, Err(ref e) if e.is_duplicate()));
    }

    #[tokio::test]
    #[ignore] // Only run with database available
    async fn test_decide_is_single_shot() {
        let db = test_db().await;
        let memberships = MembershipRepository::new(db.pool().clone());
        let organizations = OrganizationRepository::new(db.pool().clone());

        let founder = create_member(&db, "founder").await;
        let joiner = create_member(&db, "joiner").await;
        let org = organizations
            .create_with_founder(founder, &format!("shelter-{}", Uuid::new_v4()))
            .await
            .unwrap();
        memberships.request_join(joiner, org.id).await.unwrap();

        let first = memberships
            .decide(org.id, joiner, MembershipStatus::Validated)
            .await
            .unwrap();
        assert_eq!(first.unwrap().status, MembershipStatus::Validated);

        // The row is no longer pending; the same decision finds nothing.
        let second = memberships
            .decide(org.id, joiner, MembershipStatus::Validated)
            .await
            .unwrap();
        assert!(second.is_none());

        // Approval opens the door that was shut while pending.
        assert!(memberships.has_validated(joiner, org.id).await.unwrap());
    }

    #[tokio::test]
    #[ignore] // Only run with database available
    async fn test_pending_member_is_not_validated() {
        let db = test_db().await;
        let memberships = MembershipRepository::new(db.pool().clone());
        let organizations = OrganizationRepository::new(db.pool().clone());

        let founder = create_member(&db, "founder").await;
        let joiner = create_member(&db, "joiner").await;
        let org = organizations
            .create_with_founder(founder, &format!("shelter-{}", Uuid::new_v4()))
            .await
            .unwrap();
        memberships.request_join(joiner, org.id).await.unwrap();

        assert!(!memberships.has_validated(joiner, org.id).await.unwrap());
        assert!(memberships.has_validated(founder, org.id).await.unwrap());
        assert!(memberships.is_superadmin(founder, org.id).await.unwrap());
        assert!(!memberships.is_superadmin(joiner, org.id).await.unwrap());
    }

    #[tokio::test]
    #[ignore] // Only run with database available
    async fn test_directory_partitions() {
        let db = test_db().await;
        let memberships = MembershipRepository::new(db.pool().clone());
        let organizations = OrganizationRepository::new(db.pool().clone());

        let founder = create_member(&db, "founder").await;
        let joiner = create_member(&db, "joiner").await;
        let org = organizations
            .create_with_founder(founder, &format!("shelter-{}", Uuid::new_v4()))
            .await
            .unwrap();
        memberships.request_join(joiner, org.id).await.unwrap();

        let founder_view = memberships.directory_for_member(founder).await.unwrap();
        assert!(founder_view
            .organizations
            .iter()
            .any(|o| o.organization_id == org.id));
        assert!(founder_view
            .pending
            .iter()
            .any(|p| p.member_id == joiner && p.organization_id == org.id));

        let joiner_view = memberships.directory_for_member(joiner).await.unwrap();
        assert!(joiner_view.organizations.is_empty());
        assert!(joiner_view
            .my_pending
            .iter()
            .any(|o| o.organization_id == org.id));
        // The joiner administers nothing, so no approvals are offered.
        assert!(joiner_view.pending.is_empty());
    }
}
