use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;
use crate::database::models::admin::{ROLE_ADMIN, ROLE_SUPER_ADMIN};

/// Role carried by tokens issued to registered users without back-office access.
pub const ROLE_USER: &str = "user";

/// Claims embedded in every bearer token: the principal's identity plus the
/// role it held at issuance. Admin capability is still re-checked against the
/// admins table on each gated request, so a stale role here cannot widen access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(id: Uuid, email: String, role: String) -> Self {
        let now = Utc::now();
        let expiry_days = config::config().security.jwt_expiry_days;
        let exp = (now + Duration::days(expiry_days)).timestamp();

        Self {
            id,
            email,
            role,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token generation error: {0}")]
    TokenGeneration(String),

    #[error("signing secret is not configured")]
    MissingSecret,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("password hashing error: {0}")]
    PasswordHash(String),
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|_| AuthError::InvalidToken)?;

    Ok(token_data.claims)
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Constant result on malformed hashes; a corrupt stored hash reads as a
/// failed login, not an error the caller has to branch on.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

pub fn is_valid_role(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_SUPER_ADMIN
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-signing-secret";

    fn claims() -> Claims {
        Claims::new(Uuid::new_v4(), "admin@yanora.example".to_string(), "admin".to_string())
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let original = claims();
        let token = generate_jwt(&original, SECRET).unwrap();
        let decoded = validate_jwt(&token, SECRET).unwrap();

        assert_eq!(decoded.id, original.id);
        assert_eq!(decoded.email, original.email);
        assert_eq!(decoded.role, original.role);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = generate_jwt(&claims(), SECRET).unwrap();

        // Flip a character inside the payload segment
        let mut chars: Vec<char> = token.chars().collect();
        let mid = token.len() / 2;
        chars[mid] = if chars[mid] == 'a' { 'b' } else { 'a' };
        let tampered: String = chars.into_iter().collect();

        assert!(validate_jwt(&tampered, SECRET).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_jwt(&claims(), SECRET).unwrap();
        assert!(validate_jwt(&token, "some-other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut expired = claims();
        // Well past the default validation leeway
        expired.exp = (Utc::now() - Duration::hours(1)).timestamp();

        let token = generate_jwt(&expired, SECRET).unwrap();
        assert!(matches!(validate_jwt(&token, SECRET), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn empty_secret_refuses_to_sign_or_verify() {
        assert!(matches!(generate_jwt(&claims(), ""), Err(AuthError::MissingSecret)));
        assert!(matches!(validate_jwt("whatever", ""), Err(AuthError::MissingSecret)));
    }

    #[test]
    fn password_hash_verifies_and_rejects() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
        assert!(!verify_password("correct horse", "not-a-bcrypt-hash"));
    }

    #[test]
    fn role_validation() {
        assert!(is_valid_role("admin"));
        assert!(is_valid_role("super_admin"));
        assert!(!is_valid_role("user"));
        assert!(!is_valid_role(""));
    }
}
