//! Authentication service

use crate::error::{CatalogError, Result};
use crate::storage::{Database, SessionStore};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use std::sync::Arc;
use techflow_types::Session;
use tracing::info;

pub struct AuthService {
    db: Arc<Database>,
    sessions: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(db: Arc<Database>, sessions: Arc<SessionStore>) -> Self {
        Self { db, sessions }
    }

    /// Hash a plaintext password with a fresh salt.
    pub fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CatalogError::PasswordHash(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verify credentials and establish a session.
    ///
    /// Unknown usernames and wrong passwords fail identically so the
    /// response does not reveal whether the account exists. There is no
    /// lockout and no rate limiting.
    pub async fn login(&self, username: &str, password: &str) -> Result<(String, Session)> {
        let account = self.db.find_account(username).await?;

        if let Some(account) = account {
            let parsed_hash = PasswordHash::new(&account.password_hash)
                .map_err(|e| CatalogError::PasswordHash(e.to_string()))?;

            if Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
            {
                let session = Session {
                    user_id: account.id,
                    username: account.username,
                };
                let token = self.sessions.insert(session.clone());
                info!("Login successful for: {}", username);
                return Ok((token, session));
            }
        }

        info!("Login failed for: {}", username);
        Err(CatalogError::InvalidCredentials)
    }

    /// Tear down a session. Logging out with no active session is a no-op.
    pub fn logout(&self, token: &str) {
        self.sessions.remove(token);
    }

    /// Resolve a cookie token to its live session, if any.
    pub fn session(&self, token: &str) -> Option<Session> {
        self.sessions.get(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn auth_with_seeded_admin() -> AuthService {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let hash = AuthService::hash_password("admin123").unwrap();
        db.seed("admin", &hash).await.unwrap();
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(60)));
        AuthService::new(db, sessions)
    }

    #[tokio::test]
    async fn login_with_valid_credentials() {
        let auth = auth_with_seeded_admin().await;

        let (token, session) = auth.login("admin", "admin123").await.unwrap();
        assert_eq!(session.username, "admin");
        assert_eq!(auth.session(&token), Some(session));
    }

    #[tokio::test]
    async fn login_with_wrong_password() {
        let auth = auth_with_seeded_admin().await;

        let err = auth.login("admin", "wrong").await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_with_unknown_user_fails_the_same_way() {
        let auth = auth_with_seeded_admin().await;

        let err = auth.login("nobody", "admin123").await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCredentials));
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let auth = auth_with_seeded_admin().await;

        let (token, _) = auth.login("admin", "admin123").await.unwrap();
        auth.logout(&token);
        assert_eq!(auth.session(&token), None);

        // Second logout with no active session is a no-op
        auth.logout(&token);
    }
}
