//! Authorization gates as axum extractors.
//!
//! - `RequireLogin` - signed-in user with a live backend session, else `303 /login`
//! - `RequireAdmin` - admin in the session, else `303 /`
//! - `OptionalUser` - signed-in user if there is one
//!
//! All three read the [`SessionHandle`] injected by the session middleware.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;

use crate::domain::foundation::Timestamp;
use crate::domain::user::SessionUser;

use super::super::AppState;
use super::session::SessionHandle;

/// Extractor that requires a signed-in user.
///
/// Also keeps the backend session alive: tokens near expiry are refreshed, and a
/// session whose tokens cannot be refreshed is cleared and sent to `/login`.
#[derive(Clone)]
pub struct RequireLogin {
    pub user: SessionUser,
    pub session: SessionHandle,
}

impl RequireLogin {
    /// Backend access token for calls made on the user's behalf.
    pub async fn access_token(&self) -> Option<String> {
        self.session.lock().await.access_token().map(str::to_string)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequireLogin {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<SessionHandle>()
            .cloned()
            .ok_or_else(|| Redirect::to("/login"))?;

        let mut web = session.lock().await;
        let Some(user) = web.user.clone() else {
            return Err(Redirect::to("/login"));
        };

        if !state
            .bridge
            .ensure_backend_session(&mut web, Timestamp::now())
            .await
        {
            tracing::info!(user_id = %user.user_id, "Backend session lost, signing out");
            web.clear();
            return Err(Redirect::to("/login"));
        }
        drop(web);

        Ok(Self { user, session })
    }
}

/// Extractor that requires an admin in the session. Guests and non-admins go to `/`.
#[derive(Clone)]
pub struct RequireAdmin(pub SessionUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<SessionHandle>() {
            Some(session) => session.user().await,
            None => None,
        };
        match user {
            Some(user) if user.is_admin => Ok(Self(user)),
            _ => Err(Redirect::to("/")),
        }
    }
}

/// Extractor for pages that render for everyone.
#[derive(Clone)]
pub struct OptionalUser(pub Option<SessionUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<SessionHandle>() {
            Some(session) => session.user().await,
            None => None,
        };
        Ok(Self(user))
    }
}
