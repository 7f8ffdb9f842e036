use crate::error::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime. Tokens are stateless and self-contained; logout is
/// client-side deletion, so a leaked token stays valid until this expiry.
const TOKEN_EXP_DAYS: i64 = 14;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Member ID
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn member_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| {
            crate::error::AuthError::InvalidToken("subject is not a member id".to_string())
        })
    }
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    token_exp_days: i64,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            token_exp_days: TOKEN_EXP_DAYS,
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        Self::new(&secret)
    }

    /// Generate a session token embedding the member id and email
    pub fn generate_token(&self, member_id: Uuid, email: &str) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::days(self.token_exp_days);

        let claims = Claims {
            sub: member_id.to_string(),
            email: email.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate signature and expiry, returning the embedded claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(self.algorithm);
        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;

    #[test]
    fn test_generate_and_validate_token() {
        let jwt = JwtService::new("test-secret-key-min-32-characters-long");
        let member_id = Uuid::new_v4();

        let token = jwt
            .generate_token(member_id, "test@example.com")
            .expect("Failed to generate token");

        let claims = jwt
            .validate_token(&token)
            .expect("Failed to validate token");

        assert_eq!(claims.sub, member_id.to_string());
        assert_eq!(claims.member_id().unwrap(), member_id);
        assert_eq!(claims.email, "test@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let jwt = JwtService::new("test-secret-key-min-32-characters-long");
        let other = JwtService::new("another-secret-key-32-characters-xx");

        let token = jwt
            .generate_token(Uuid::new_v4(), "test@example.com")
            .unwrap();

        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt = JwtService::new("test-secret-key-min-32-characters-long");

        // Forge a token whose expiry is already in the past
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            exp: (now - Duration::days(1)).timestamp(),
            iat: (now - Duration::days(15)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("test-secret-key-min-32-characters-long".as_bytes()),
        )
        .unwrap();

        let result = jwt.validate_token(&token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let jwt = JwtService::new("test-secret-key-min-32-characters-long");
        assert!(jwt.validate_token("not-a-token").is_err());
    }
}
