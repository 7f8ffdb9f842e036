use crate::error::{DatabaseError, Result};
use aster_models::{Member, NewMember};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new member. The password is hashed by the caller; this
    /// layer never sees the clear text.
    pub async fn create(&self, member: &NewMember, password_hash: &str) -> Result<Member> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (first_name, last_name, email, phone_number, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .bind(&member.phone_number)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DatabaseError::duplicate("Member", "email or phone number")
            }
            _ => e.into(),
        })?;

        Ok(member)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(member)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Member>> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(member)
    }

    /// Whether a member already uses this email or phone number
    pub async fn identity_taken(&self, email: &str, phone_number: &str) -> Result<bool> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM members
                WHERE email = $1 OR phone_number = $2
            )
            "#,
        )
        .bind(email)
        .bind(phone_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }
}
