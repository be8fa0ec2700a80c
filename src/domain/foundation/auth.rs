//! Authentication types for the domain layer.
//!
//! These types describe what the managed backend's auth service hands back after a
//! sign-in, sign-up or refresh. They have **no transport dependencies**; the
//! Supabase adapter and the in-memory adapter both populate them via the
//! `AuthProvider` port.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use super::{Timestamp, UserId};

/// Account record returned by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendUser {
    pub id: UserId,
    pub email: String,
}

/// Token pair issued by the auth provider.
#[derive(Debug, Clone)]
pub struct BackendSession {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
}

impl BackendSession {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: i64,
    ) -> Self {
        Self {
            access_token: SecretString::new(access_token.into()),
            refresh_token: SecretString::new(refresh_token.into()),
            expires_in,
        }
    }

    /// Absolute expiry of the access token, counted from `issued_at`.
    pub fn expires_at(&self, issued_at: Timestamp) -> Timestamp {
        issued_at.plus_secs(self.expires_in)
    }
}

impl PartialEq for BackendSession {
    fn eq(&self, other: &Self) -> bool {
        self.access_token.expose_secret() == other.access_token.expose_secret()
            && self.refresh_token.expose_secret() == other.refresh_token.expose_secret()
            && self.expires_in == other.expires_in
    }
}

/// Result of a successful sign-in or sign-up.
///
/// `session` is `None` when the provider created the account but wants the email
/// confirmed before issuing tokens.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user: BackendUser,
    pub session: Option<BackendSession>,
}

/// Authentication errors surfaced by the auth provider.
///
/// These errors are **domain-centric**: they describe what went wrong from the
/// application's perspective, not the provider's wire format.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Email/password pair was not accepted.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// The token is missing, malformed, or has been revoked.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The refresh token itself has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The account behind a token no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// The provider returned a user-facing rejection (duplicate email, weak password, ...).
    #[error("{0}")]
    Rejected(String),

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Creates a provider rejection with a message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Returns true if this error indicates the user should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserNotFound
        )
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_session_expires_at_adds_lifetime() {
        let session = BackendSession::new("access", "refresh", 3600);
        let issued = Timestamp::from_unix_secs(10_000).unwrap();

        assert_eq!(session.expires_at(issued).as_unix_secs(), 13_600);
    }

    #[test]
    fn backend_session_debug_redacts_tokens() {
        let session = BackendSession::new("super-secret-access", "super-secret-refresh", 60);
        let rendered = format!("{:?}", session);

        assert!(!rendered.contains("super-secret-access"));
        assert!(!rendered.contains("super-secret-refresh"));
    }

    #[test]
    fn auth_error_rejected_displays_message() {
        let err = AuthError::rejected("User already registered");
        assert_eq!(format!("{}", err), "User already registered");
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::InvalidCredentials.requires_reauthentication());
        assert!(!AuthError::service_unavailable("").requires_reauthentication());
    }

    #[test]
    fn auth_error_is_transient_for_service_errors() {
        assert!(AuthError::service_unavailable("timeout").is_transient());
        assert!(!AuthError::InvalidToken.is_transient());
    }
}
