//! Auth provider port for the managed backend's authentication service.
//!
//! Password sign-in and sign-up hand back the account plus (usually) a token pair.
//! The token pair is copied into the web session and refreshed before it lapses.
//!
//! # Example
//!
//! ```ignore
//! let outcome = auth.sign_in("ada@campus.edu", "hunter22").await?;
//! if let Some(tokens) = &outcome.session {
//!     web_session.store_tokens(tokens, Timestamp::now());
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthOutcome, BackendSession};

/// Authentication operations offered by the managed backend.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidCredentials` for a rejected email/password pair
/// - Return `AuthError::Rejected` with the provider's message for other refusals
/// - Return `AuthError::ServiceUnavailable` for transport failures
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Signs in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError>;

    /// Creates an account. `session` is `None` when email confirmation is pending.
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError>;

    /// Exchanges a refresh token for a fresh token pair.
    async fn refresh(&self, refresh_token: &str) -> Result<BackendSession, AuthError>;

    /// Revokes the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{BackendUser, UserId};

    struct FixedAuth;

    #[async_trait]
    impl AuthProvider for FixedAuth {
        async fn sign_in(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
            if password != "secret" {
                return Err(AuthError::InvalidCredentials);
            }
            Ok(AuthOutcome {
                user: BackendUser {
                    id: UserId::new("user-1").unwrap(),
                    email: email.to_string(),
                },
                session: Some(BackendSession::new("access", "refresh", 3600)),
            })
        }

        async fn sign_up(&self, _email: &str, _password: &str) -> Result<AuthOutcome, AuthError> {
            Err(AuthError::rejected("User already registered"))
        }

        async fn refresh(&self, _refresh_token: &str) -> Result<BackendSession, AuthError> {
            Err(AuthError::TokenExpired)
        }

        async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
            Ok(())
        }
    }

    #[test]
    fn auth_provider_is_object_safe() {
        fn _accepts_dyn(_auth: &dyn AuthProvider) {}
    }

    #[tokio::test]
    async fn sign_in_issues_session_for_valid_password() {
        let outcome = FixedAuth.sign_in("ada@campus.edu", "secret").await.unwrap();

        assert_eq!(outcome.user.email, "ada@campus.edu");
        assert!(outcome.session.is_some());
    }

    #[tokio::test]
    async fn sign_in_rejects_wrong_password() {
        let result = FixedAuth.sign_in("ada@campus.edu", "nope").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }
}
