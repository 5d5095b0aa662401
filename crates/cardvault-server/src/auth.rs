use anyhow::{Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use cardvault_common::models::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::{errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

/// Fixed session lifetime; there is no refresh or revocation mechanism.
const SESSION_TTL_DAYS: i64 = 7;

/// Why a session token failed verification.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("session token expired")]
    Expired,
    #[error("session token invalid")]
    Invalid,
}

/// Hash a password using argon2id
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Create a session token (JWT) with a 7-day TTL.
///
/// `user_id` is carried both as the subject and as a typed claim.
pub fn create_session_token(user_id: Uuid, email: &str, jwt_secret: &str) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        user_id,
        iat: now.timestamp(),
        exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .context("Failed to create session token")
}

/// Validate a session token and return its claims.
///
/// Expiry is checked with zero leeway; a token is either valid or it is not.
pub fn validate_session_token(token: &str, jwt_secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::default();
    validation.leeway = 0;
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify_correct() {
        let password = "my-secure-password";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).unwrap());
    }

    #[test]
    fn test_password_verify_wrong() {
        let hash = hash_password("correct-password").unwrap();
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_password_different_salts() {
        let password = "same-password";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();
        assert_ne!(hash1, hash2);
        // Both still verify
        assert!(verify_password(password, &hash1).unwrap());
        assert!(verify_password(password, &hash2).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_password("password", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_token_create_and_validate() {
        let secret = "test-jwt-secret";
        let user_id = Uuid::new_v4();
        let token = create_session_token(user_id, "test@example.com", secret).unwrap();
        let claims = validate_session_token(&token, secret).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn test_token_wrong_secret_is_invalid() {
        let token = create_session_token(Uuid::new_v4(), "test@example.com", "secret-1").unwrap();
        let err = validate_session_token(&token, "secret-2").unwrap_err();
        assert!(matches!(err, TokenError::Invalid));
    }

    #[test]
    fn test_token_garbage_is_invalid() {
        let err = validate_session_token("not.a.jwt", "secret").unwrap_err();
        assert!(matches!(err, TokenError::Invalid));
    }

    #[test]
    fn test_expired_token_fails_as_expired() {
        let secret = "test-jwt-secret";
        let user_id = Uuid::new_v4();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            email: "test@example.com".to_string(),
            user_id,
            iat: now - 1000,
            exp: now - 10,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();
        let err = validate_session_token(&token, secret).unwrap_err();
        assert!(matches!(err, TokenError::Expired));
    }
}
