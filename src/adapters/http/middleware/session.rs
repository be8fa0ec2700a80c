//! Web session middleware and the signed session cookie.
//!
//! The cookie only carries `<session id>.<hex HMAC-SHA256 of the id>`. The session
//! body lives in a [`SessionStore`]; handlers reach it through a [`SessionHandle`]
//! that the middleware injects into request extensions.
//!
//! ```text
//! Request → session_middleware → loads WebSession, injects SessionHandle
//!                                      ↓
//!                              Handler reads/mutates the handle
//!                                      ↓
//! Response ← saves (or removes) the session, sets the cookie
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tokio::sync::{Mutex, MutexGuard};

use crate::config::SessionConfig;
use crate::domain::foundation::{DomainError, ErrorCode, WebSessionId};
use crate::domain::user::{SessionUser, WebSession};
use crate::ports::SessionStore;

use super::super::AppState;

type HmacSha256 = Hmac<Sha256>;

// ════════════════════════════════════════════════════════════════════════════════
// Cookie signing
// ════════════════════════════════════════════════════════════════════════════════

/// Signs and verifies session cookie values.
#[derive(Clone)]
pub struct CookieSigner {
    mac: HmacSha256,
}

impl CookieSigner {
    pub fn new(secret: &[u8]) -> Result<Self, DomainError> {
        let mac = HmacSha256::new_from_slice(secret).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Session signing key: {}", e))
        })?;
        Ok(Self { mac })
    }

    /// Cookie value for `id`.
    pub fn sign(&self, id: &WebSessionId) -> String {
        let id = id.to_string();
        format!("{}.{}", id, hex::encode(self.digest(id.as_bytes())))
    }

    /// Session id carried by a cookie value, if the signature matches.
    pub fn verify(&self, value: &str) -> Option<WebSessionId> {
        let (id, signature) = value.split_once('.')?;
        let signature = hex::decode(signature).ok()?;
        let expected = self.digest(id.as_bytes());
        if expected.len() != signature.len() {
            return None;
        }
        if expected.as_slice().ct_eq(signature.as_slice()).unwrap_u8() != 1 {
            return None;
        }
        id.parse().ok()
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Session manager
// ════════════════════════════════════════════════════════════════════════════════

/// Everything the middleware needs to load, save and address sessions.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    signer: CookieSigner,
    cookie_name: String,
    lifetime: Duration,
    secure: bool,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, config: &SessionConfig) -> Result<Self, DomainError> {
        Ok(Self {
            store,
            signer: CookieSigner::new(config.secret_key.expose_secret().as_bytes())?,
            cookie_name: config.cookie_name.clone(),
            lifetime: config.lifetime(),
            secure: config.secure_cookie,
        })
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn signer(&self) -> &CookieSigner {
        &self.signer
    }

    /// Verified session id from the request's cookies.
    fn session_id(&self, headers: &HeaderMap) -> Option<WebSessionId> {
        cookie_value(headers, &self.cookie_name).and_then(|v| self.signer.verify(v))
    }

    fn set_cookie(&self, id: &WebSessionId) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.cookie_name,
            self.signer.sign(id),
            self.lifetime.as_secs()
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    fn expire_cookie(&self) -> String {
        format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", self.cookie_name)
    }

    async fn load(&self, id: &WebSessionId) -> Option<WebSession> {
        match self.store.load(id).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Session load failed, starting fresh");
                None
            }
        }
    }
}

/// Value of cookie `name` across all `Cookie` headers.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

// ════════════════════════════════════════════════════════════════════════════════
// Session handle
// ════════════════════════════════════════════════════════════════════════════════

/// Request-scoped access to the web session.
#[derive(Clone, Default)]
pub struct SessionHandle {
    inner: Arc<Mutex<WebSession>>,
}

impl SessionHandle {
    pub fn new(session: WebSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, WebSession> {
        self.inner.lock().await
    }

    /// Signed-in user, if any.
    pub async fn user(&self) -> Option<SessionUser> {
        self.inner.lock().await.user.clone()
    }

    pub async fn snapshot(&self) -> WebSession {
        self.inner.lock().await.clone()
    }
}

/// Rejection when the session middleware is not installed.
#[derive(Debug)]
pub struct SessionLayerMissing;

impl IntoResponse for SessionLayerMissing {
    fn into_response(self) -> Response {
        tracing::error!("Session middleware not installed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Session unavailable").into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionHandle
where
    S: Send + Sync,
{
    type Rejection = SessionLayerMissing;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionHandle>()
            .cloned()
            .ok_or(SessionLayerMissing)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Middleware
// ════════════════════════════════════════════════════════════════════════════════

/// Loads the web session before the handler and persists it afterwards.
///
/// - A missing, tampered or expired cookie starts an empty session
/// - A non-empty session is saved with the configured lifetime and the cookie renewed
/// - A session emptied by the handler is removed and its cookie expired
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let manager = &state.sessions;

    let existing = match manager.session_id(request.headers()) {
        Some(id) => manager.load(&id).await.map(|session| (id, session)),
        None => None,
    };
    let known = existing.is_some();
    let (id, session) = existing.unwrap_or_else(|| (WebSessionId::new(), WebSession::default()));

    let handle = SessionHandle::new(session);
    request.extensions_mut().insert(handle.clone());

    let mut response = next.run(request).await;

    let session = handle.snapshot().await;
    let cookie = if session.is_empty() {
        if !known {
            return response;
        }
        if let Err(e) = manager.store.remove(&id).await {
            tracing::warn!(error = %e, "Session removal failed");
        }
        manager.expire_cookie()
    } else {
        if let Err(e) = manager.store.save(&id, &session, manager.lifetime).await {
            tracing::error!(error = %e, "Session save failed");
            return response;
        }
        manager.set_cookie(&id)
    };

    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(e) => tracing::error!(error = %e, "Session cookie not representable"),
    }
    response
}
