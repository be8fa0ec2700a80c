//! In-memory `AuthProvider` for development and tests.
//!
//! Mirrors the hosted auth service closely enough for the web flows: duplicate
//! emails and short passwords are rejected with the same messages, refresh tokens
//! rotate on use, and sign-out revokes every token of the user.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::foundation::{AuthError, AuthOutcome, BackendSession, BackendUser, UserId};
use crate::ports::AuthProvider;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    user: BackendUser,
    password_digest: Vec<u8>,
}

#[derive(Debug, Default)]
struct AuthState {
    /// Keyed by lower-cased email.
    accounts: HashMap<String, Account>,
    access_tokens: HashMap<String, UserId>,
    refresh_tokens: HashMap<String, UserId>,
    unavailable: bool,
}

/// Auth provider keeping accounts and tokens in process memory.
#[derive(Debug, Clone)]
pub struct MemoryAuthProvider {
    state: Arc<RwLock<AuthState>>,
    token_lifetime_secs: i64,
    confirm_email: bool,
}

impl Default for MemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(AuthState::default())),
            token_lifetime_secs: 3600,
            confirm_email: false,
        }
    }

    /// Lifetime reported for issued access tokens.
    pub fn with_token_lifetime(mut self, secs: i64) -> Self {
        self.token_lifetime_secs = secs;
        self
    }

    /// When set, sign-up creates the account but issues no tokens.
    pub fn with_email_confirmation(mut self, required: bool) -> Self {
        self.confirm_email = required;
        self
    }

    // === Test Helpers ===

    /// Makes every call fail with `ServiceUnavailable` (or recover).
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.write().await.unavailable = unavailable;
    }

    /// Whether `access_token` is currently valid.
    pub async fn is_active(&self, access_token: &str) -> bool {
        self.state.read().await.access_tokens.contains_key(access_token)
    }

    fn digest(password: &str) -> Vec<u8> {
        Sha256::digest(password.as_bytes()).to_vec()
    }

    fn issue(&self, state: &mut AuthState, user_id: &UserId) -> BackendSession {
        let access = Uuid::new_v4().simple().to_string();
        let refresh = Uuid::new_v4().simple().to_string();
        state.access_tokens.insert(access.clone(), user_id.clone());
        state.refresh_tokens.insert(refresh.clone(), user_id.clone());
        BackendSession::new(access, refresh, self.token_lifetime_secs)
    }
}

fn check_available(state: &AuthState) -> Result<(), AuthError> {
    if state.unavailable {
        return Err(AuthError::service_unavailable("auth service offline"));
    }
    Ok(())
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let mut state = self.state.write().await;
        check_available(&state)?;
        let account = state
            .accounts
            .get(&email.trim().to_lowercase())
            .filter(|a| a.password_digest == Self::digest(password))
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;
        let session = self.issue(&mut state, &account.user.id);
        Ok(AuthOutcome {
            user: account.user,
            session: Some(session),
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let mut state = self.state.write().await;
        check_available(&state)?;
        let key = email.trim().to_lowercase();
        if key.is_empty() {
            return Err(AuthError::rejected("Anonymous sign-ins are disabled"));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::rejected(format!(
                "Password should be at least {} characters.",
                MIN_PASSWORD_LEN
            )));
        }
        if state.accounts.contains_key(&key) {
            return Err(AuthError::rejected("User already registered"));
        }

        let id = UserId::new(Uuid::new_v4().to_string())
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;
        let user = BackendUser {
            id,
            email: email.trim().to_string(),
        };
        state.accounts.insert(
            key,
            Account {
                user: user.clone(),
                password_digest: Self::digest(password),
            },
        );

        let session = (!self.confirm_email).then(|| self.issue(&mut state, &user.id));
        Ok(AuthOutcome { user, session })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<BackendSession, AuthError> {
        let mut state = self.state.write().await;
        check_available(&state)?;
        let user_id = state
            .refresh_tokens
            .remove(refresh_token)
            .ok_or(AuthError::InvalidToken)?;
        if !state.accounts.values().any(|a| a.user.id == user_id) {
            return Err(AuthError::UserNotFound);
        }
        Ok(self.issue(&mut state, &user_id))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let mut state = self.state.write().await;
        check_available(&state)?;
        let user_id = state
            .access_tokens
            .remove(access_token)
            .ok_or(AuthError::InvalidToken)?;
        state.access_tokens.retain(|_, id| *id != user_id);
        state.refresh_tokens.retain(|_, id| *id != user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn sign_up_then_sign_in() {
        let auth = MemoryAuthProvider::new();
        let created = auth.sign_up("Ada@Campus.edu", "hunter22").await.unwrap();
        assert!(created.session.is_some());

        let signed_in = auth.sign_in("ada@campus.edu", "hunter22").await.unwrap();
        assert_eq!(signed_in.user.id, created.user.id);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let auth = MemoryAuthProvider::new();
        auth.sign_up("ada@campus.edu", "hunter22").await.unwrap();

        let err = auth.sign_in("ada@campus.edu", "nope").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let auth = MemoryAuthProvider::new();
        auth.sign_up("ada@campus.edu", "hunter22").await.unwrap();

        let err = auth.sign_up("ada@campus.edu", "hunter22").await.unwrap_err();
        assert_eq!(err.to_string(), "User already registered");
    }

    #[tokio::test]
    async fn email_confirmation_withholds_tokens() {
        let auth = MemoryAuthProvider::new().with_email_confirmation(true);
        let outcome = auth.sign_up("ada@campus.edu", "hunter22").await.unwrap();
        assert!(outcome.session.is_none());
    }

    #[tokio::test]
    async fn refresh_rotates_tokens() {
        let auth = MemoryAuthProvider::new();
        let outcome = auth.sign_up("ada@campus.edu", "hunter22").await.unwrap();
        let refresh = outcome.session.unwrap().refresh_token.expose_secret().clone();

        let renewed = auth.refresh(&refresh).await.unwrap();
        assert_ne!(renewed.refresh_token.expose_secret(), &refresh);
        assert!(matches!(
            auth.refresh(&refresh).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn sign_out_revokes_tokens() {
        let auth = MemoryAuthProvider::new();
        let session = auth
            .sign_up("ada@campus.edu", "hunter22")
            .await
            .unwrap()
            .session
            .unwrap();
        let access = session.access_token.expose_secret().clone();

        auth.sign_out(&access).await.unwrap();

        assert!(!auth.is_active(&access).await);
        assert!(auth
            .refresh(session.refresh_token.expose_secret())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn unavailable_service_is_transient() {
        let auth = MemoryAuthProvider::new();
        auth.set_unavailable(true).await;

        let err = auth.sign_in("a@b.c", "secret").await.unwrap_err();
        assert!(err.is_transient());
    }
}
