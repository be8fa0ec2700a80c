//! Session bridge - keeps the backend's auth tokens alive inside the web session.
//!
//! After sign-in the backend's token pair is copied into the [`WebSession`]. Every
//! gated request then calls [`SessionBridge::ensure_backend_session`], which
//! refreshes the pair once the access token is within the refresh window of
//! expiring.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{BackendSession, Timestamp};
use crate::domain::user::WebSession;
use crate::ports::AuthProvider;

/// Default refresh window: refresh when fewer than 120 s remain.
pub const DEFAULT_REFRESH_WINDOW: Duration = Duration::from_secs(120);

/// Copies backend tokens into web sessions and refreshes them on demand.
#[derive(Clone)]
pub struct SessionBridge {
    auth: Arc<dyn AuthProvider>,
    refresh_window: Duration,
}

impl SessionBridge {
    pub fn new(auth: Arc<dyn AuthProvider>, refresh_window: Duration) -> Self {
        Self {
            auth,
            refresh_window,
        }
    }

    /// Stores the token pair with `expires_at = now + expires_in`.
    ///
    /// A missing backend session leaves the web session untouched.
    pub fn save_backend_session(
        web: &mut WebSession,
        session: Option<&BackendSession>,
        now: Timestamp,
    ) {
        if let Some(session) = session {
            web.store_tokens(session, now);
        }
    }

    /// Returns `true` when the web session holds usable backend tokens.
    ///
    /// Tokens close to expiry are refreshed first; a failed refresh returns `false`.
    pub async fn ensure_backend_session(&self, web: &mut WebSession, now: Timestamp) -> bool {
        let Some(refresh_token) = web.refresh_token().map(str::to_string) else {
            return false;
        };
        if web.access_token().is_none() {
            return false;
        }

        let remaining = web
            .expires_at
            .map(|expires_at| now.secs_until(&expires_at))
            .unwrap_or(i64::MIN);
        if remaining >= self.refresh_window.as_secs() as i64 {
            return true;
        }

        match self.auth.refresh(&refresh_token).await {
            Ok(session) => {
                tracing::debug!(remaining_secs = remaining, "Refreshed backend session");
                Self::save_backend_session(web, Some(&session), now);
                true
            }
            Err(e) if e.requires_reauthentication() => {
                tracing::info!(error = %e, "Backend session ended, sign-in required");
                false
            }
            Err(e) if e.is_transient() => {
                tracing::warn!(error = %e, "Auth service unavailable during refresh");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "Backend session refresh failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AuthError, AuthOutcome};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAuth {
        refreshes: AtomicUsize,
        failure: Option<AuthError>,
    }

    impl CountingAuth {
        fn new(fail: bool) -> Arc<Self> {
            Self::failing_with(fail.then_some(AuthError::InvalidToken))
        }

        fn failing_with(failure: Option<AuthError>) -> Arc<Self> {
            Arc::new(Self {
                refreshes: AtomicUsize::new(0),
                failure,
            })
        }
    }

    #[async_trait]
    impl AuthProvider for CountingAuth {
        async fn sign_in(&self, _: &str, _: &str) -> Result<AuthOutcome, AuthError> {
            Err(AuthError::InvalidCredentials)
        }

        async fn sign_up(&self, _: &str, _: &str) -> Result<AuthOutcome, AuthError> {
            Err(AuthError::InvalidCredentials)
        }

        async fn refresh(&self, _: &str) -> Result<BackendSession, AuthError> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            if let Some(error) = &self.failure {
                return Err(error.clone());
            }
            Ok(BackendSession::new("fresh-access", "fresh-refresh", 3600))
        }

        async fn sign_out(&self, _: &str) -> Result<(), AuthError> {
            Ok(())
        }
    }

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_unix_secs(secs).unwrap()
    }

    fn web_expiring_in(secs: i64, now: Timestamp) -> WebSession {
        let mut web = WebSession::default();
        SessionBridge::save_backend_session(
            &mut web,
            Some(&BackendSession::new("access", "refresh", secs)),
            now,
        );
        web
    }

    #[test]
    fn save_without_backend_session_is_noop() {
        let mut web = WebSession::default();
        SessionBridge::save_backend_session(&mut web, None, at(0));
        assert!(web.is_empty());
    }

    #[tokio::test]
    async fn missing_tokens_fail() {
        let auth = CountingAuth::new(false);
        let bridge = SessionBridge::new(auth.clone(), DEFAULT_REFRESH_WINDOW);

        assert!(!bridge.ensure_backend_session(&mut WebSession::default(), at(0)).await);
        assert_eq!(auth.refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fresh_tokens_are_kept() {
        let auth = CountingAuth::new(false);
        let bridge = SessionBridge::new(auth.clone(), DEFAULT_REFRESH_WINDOW);
        let mut web = web_expiring_in(3600, at(1_000));

        assert!(bridge.ensure_backend_session(&mut web, at(1_000)).await);
        assert_eq!(web.access_token(), Some("access"));
        assert_eq!(auth.refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn tokens_inside_window_are_refreshed() {
        let auth = CountingAuth::new(false);
        let bridge = SessionBridge::new(auth.clone(), DEFAULT_REFRESH_WINDOW);
        let mut web = web_expiring_in(3600, at(1_000));

        // 119 s before expiry
        assert!(bridge.ensure_backend_session(&mut web, at(4_481)).await);
        assert_eq!(web.access_token(), Some("fresh-access"));
        assert_eq!(web.expires_at, Some(at(4_481 + 3600)));
        assert_eq!(auth.refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exactly_window_remaining_is_not_refreshed() {
        let auth = CountingAuth::new(false);
        let bridge = SessionBridge::new(auth.clone(), DEFAULT_REFRESH_WINDOW);
        let mut web = web_expiring_in(120, at(0));

        assert!(bridge.ensure_backend_session(&mut web, at(0)).await);
        assert_eq!(auth.refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_refresh_reports_false() {
        let auth = CountingAuth::new(true);
        let bridge = SessionBridge::new(auth.clone(), DEFAULT_REFRESH_WINDOW);
        let mut web = web_expiring_in(10, at(0));

        assert!(!bridge.ensure_backend_session(&mut web, at(0)).await);
        assert_eq!(web.access_token(), Some("access"));
    }

    #[tokio::test]
    async fn every_kind_of_refresh_failure_reports_false() {
        let failures = [
            AuthError::TokenExpired,
            AuthError::service_unavailable("timeout"),
            AuthError::rejected("refresh token reused"),
        ];
        for failure in failures {
            let auth = CountingAuth::failing_with(Some(failure.clone()));
            let bridge = SessionBridge::new(auth.clone(), DEFAULT_REFRESH_WINDOW);
            let mut web = web_expiring_in(10, at(0));

            assert!(!bridge.ensure_backend_session(&mut web, at(0)).await, "{}", failure);
            assert_eq!(auth.refreshes.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn missing_expiry_forces_refresh() {
        let auth = CountingAuth::new(false);
        let bridge = SessionBridge::new(auth.clone(), DEFAULT_REFRESH_WINDOW);
        let mut web = web_expiring_in(3600, at(0));
        web.expires_at = None;

        assert!(bridge.ensure_backend_session(&mut web, at(0)).await);
        assert_eq!(auth.refreshes.load(Ordering::SeqCst), 1);
    }
}
