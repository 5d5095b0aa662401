use crate::auth::{create_session_token, hash_password, verify_password};
use crate::error::ServiceError;
use cardvault_common::models::User;
use cardvault_db::UserRepo;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Issued on successful registration or login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
}

/// Registration and login orchestration over the user store.
pub struct AuthService;

impl AuthService {
    /// Create a user and issue a session token.
    ///
    /// The email must not already be registered; the check is an exact,
    /// case-sensitive match against the stored value.
    pub async fn register(
        pool: &PgPool,
        jwt_secret: &str,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ServiceError> {
        if UserRepo::get_by_email(pool, email).await?.is_some() {
            return Err(ServiceError::Conflict);
        }

        let password_hash = hash_password(password)?;
        let user = UserRepo::create(pool, Uuid::new_v4(), username, email, &password_hash).await?;

        let token = create_session_token(user.user_id, &user.email, jwt_secret)?;
        Ok(AuthResponse {
            token,
            user_id: user.user_id,
            username: user.username,
        })
    }

    /// Verify credentials and issue a session token.
    ///
    /// Unknown email and wrong password both yield the same
    /// `Unauthenticated` error, so a caller cannot probe which emails are
    /// registered.
    pub async fn login(
        pool: &PgPool,
        jwt_secret: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ServiceError> {
        let user = UserRepo::get_by_email(pool, email)
            .await?
            .ok_or(ServiceError::Unauthenticated)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(ServiceError::Unauthenticated);
        }

        let token = create_session_token(user.user_id, &user.email, jwt_secret)?;
        Ok(AuthResponse {
            token,
            user_id: user.user_id,
            username: user.username,
        })
    }

    /// Pure lookup, no side effects.
    pub async fn get_user(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, ServiceError> {
        let row = UserRepo::get_by_id(pool, user_id).await?;
        Ok(row.map(|u| User {
            id: u.user_id,
            username: u.username,
            email: u.email,
            created_at: u.created_at,
        }))
    }
}
