use crate::error::{DatabaseError, Result};
use aster_models::{MembershipRole, MembershipStatus, Organization, OrganizationSearchResult};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an organization together with its founding membership.
    /// Both inserts share one transaction: an organization must never
    /// exist without a validated superadmin.
    pub async fn create_with_founder(&self, founder_id: Uuid, name: &str) -> Result<Organization> {
        if name.trim().is_empty() {
            return Err(DatabaseError::InvalidInput(
                "organization name must not be empty".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let organization = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name)
            VALUES ($1)
            RETURNING *
            "#,
        )
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO member_organization (member_id, organization_id, role, status)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(founder_id)
        .bind(organization.id)
        .bind(MembershipRole::Superadmin)
        .bind(MembershipStatus::Validated)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(organization)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>> {
        let organization =
            sqlx::query_as::<_, Organization>("SELECT * FROM organizations WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(organization)
    }

    /// Case-insensitive substring search on organization name. Each hit is
    /// annotated with one of its superadmins; the search is public and not
    /// authorization-gated.
    pub async fn search(&self, term: &str) -> Result<Vec<OrganizationSearchResult>> {
        let pattern = format!("%{}%", term);

        let results = sqlx::query_as::<_, OrganizationSearchResult>(
            r#"
            SELECT DISTINCT ON (o.id)
                o.id,
                o.name,
                m.first_name AS superadmin_first_name,
                m.last_name AS superadmin_last_name
            FROM organizations o
            INNER JOIN member_organization mo ON o.id = mo.organization_id
            INNER JOIN members m ON mo.member_id = m.id
            WHERE mo.role = 'superadmin' AND o.name ILIKE $1
            ORDER BY o.id
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }
}
