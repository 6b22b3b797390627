//! Authentication primitives and the [`AuthProvider`] seam.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT generation and validation.
//!
//! Handlers and the [`AuthUser`](crate::middleware::auth::AuthUser)
//! extractor only talk to `Arc<dyn AuthProvider>` from
//! [`AppState`](crate::state::AppState); the concrete provider is chosen in
//! `main`.

pub mod jwt;
pub mod password;

use std::sync::Arc;

use async_trait::async_trait;
use noteful_core::error::CoreError;
use noteful_db::models::user::User;
use noteful_db::store::DocumentStore;

use self::jwt::{generate_token, validate_token, Claims, JwtConfig};
use self::password::verify_password;

/// Message for both an unknown username and a wrong password.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Credential checks and token issuance.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Look up `username` and check `password` against its stored hash.
    async fn verify_credentials(&self, username: &str, password: &str) -> Result<User, CoreError>;

    /// Validate a bearer token and return its claims.
    fn verify_token(&self, token: &str) -> Result<Claims, CoreError>;

    /// Issue a fresh token for `user`.
    fn issue_token(&self, user: &User) -> Result<String, CoreError>;
}

/// [`AuthProvider`] that checks Argon2 hashes from the document store and
/// issues HS256 JWTs.
pub struct JwtAuthProvider {
    store: Arc<dyn DocumentStore>,
    config: JwtConfig,
}

impl JwtAuthProvider {
    pub fn new(store: Arc<dyn DocumentStore>, config: JwtConfig) -> Self {
        Self { store, config }
    }
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn verify_credentials(&self, username: &str, password: &str) -> Result<User, CoreError> {
        let user = self
            .store
            .find_user_by_username(username)
            .await
            .map_err(|e| CoreError::Internal(format!("User lookup failed: {e}")))?
            .ok_or_else(|| CoreError::Unauthorized(INVALID_CREDENTIALS.into()))?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))?;
        if !valid {
            tracing::debug!(user_id = %user.id, "Rejected login with wrong password");
            return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        Ok(user)
    }

    fn verify_token(&self, token: &str) -> Result<Claims, CoreError> {
        validate_token(token, &self.config)
            .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()))
    }

    fn issue_token(&self, user: &User) -> Result<String, CoreError> {
        generate_token(user, &self.config)
            .map_err(|e| CoreError::Internal(format!("Token generation error: {e}")))
    }
}
