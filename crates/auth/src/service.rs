use crate::error::{AuthError, Result};
use crate::jwt::{Claims, JwtService};
use crate::password::PasswordHasher;
use aster_database::{Database, DatabaseError, MemberRepository};
use aster_models::{MemberProfile, NewMember};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub first_name: String,

    #[validate(length(min = 1))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub phone_number: String,

    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub token: String,
    pub member_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub member: MemberProfile,
}

/// Hashes and verifies member passwords and issues/verifies the signed
/// session tokens carried by every authenticated request.
pub struct CredentialService {
    pub db: Database,
    pub jwt: JwtService,
    member_repo: MemberRepository,
}

impl CredentialService {
    pub fn new(db: Database, jwt: JwtService) -> Self {
        let pool = db.pool().clone();
        Self {
            db,
            jwt,
            member_repo: MemberRepository::new(pool),
        }
    }

    /// Register a new member and return a session token
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse> {
        request.validate()?;

        if self
            .member_repo
            .identity_taken(&request.email, &request.phone_number)
            .await?
        {
            return Err(AuthError::DuplicateIdentity);
        }

        let password_hash = PasswordHasher::hash(&request.password)?;

        let new_member = NewMember {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone_number: request.phone_number,
        };

        // The unique constraints on email/phone close the race with a
        // concurrent registration between the check above and this insert.
        let member = self
            .member_repo
            .create(&new_member, &password_hash)
            .await
            .map_err(|e| match e {
                DatabaseError::DuplicateEntry(_) => AuthError::DuplicateIdentity,
                other => other.into(),
            })?;

        let token = self.jwt.generate_token(member.id, &member.email)?;

        Ok(RegisterResponse {
            token,
            member_id: member.id,
        })
    }

    /// Login with email and password
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        request.validate()?;

        let member = self
            .member_repo
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthError::MemberNotFound)?;

        let is_valid = PasswordHasher::verify(&request.password, &member.password_hash)?;
        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt.generate_token(member.id, &member.email)?;

        Ok(LoginResponse {
            token,
            member: member.into(),
        })
    }

    /// Validate a session token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.jwt.validate_token(token)
    }
}
