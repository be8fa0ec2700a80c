//! HTTP handlers for the feed and account pages.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;

use crate::application::handlers::account::{
    AccountError, ListOwnResourcesQuery, RegisterCommand, SignInCommand, SignedIn,
};
use crate::application::handlers::feed::FetchFeedQuery;
use crate::application::SessionBridge;
use crate::domain::foundation::Timestamp;
use crate::domain::user::{NewProfile, Role};

use super::dto::{LoginForm, RegisterForm};
use super::middleware::{OptionalUser, RequireAdmin, RequireLogin, SessionHandle};
use super::views;
use super::AppState;

/// GET / - ranked feed
pub async fn index(State(state): State<AppState>, OptionalUser(user): OptionalUser) -> Html<String> {
    let entries = state
        .fetch_feed_handler()
        .handle(FetchFeedQuery {
            viewer: user.clone(),
        })
        .await;
    views::index_page(&entries, user.as_ref())
}

/// GET /about
pub async fn about(OptionalUser(user): OptionalUser) -> Html<String> {
    views::about_page(user.as_ref())
}

/// GET /login
pub async fn login_form() -> Html<String> {
    views::login_page(None)
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    session: SessionHandle,
    Form(form): Form<LoginForm>,
) -> Response {
    let cmd = SignInCommand {
        email: form.username,
        password: form.password,
    };
    match state.sign_in_handler().handle(cmd).await {
        Ok(signed_in) => {
            remember(&session, signed_in).await;
            Redirect::to("/").into_response()
        }
        Err(e) => views::login_page(Some(&e.to_string())).into_response(),
    }
}

/// GET /register
pub async fn register_form() -> Html<String> {
    views::register_page(None)
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    session: SessionHandle,
    Form(form): Form<RegisterForm>,
) -> Response {
    let role = match form.role.parse::<Role>() {
        Ok(role) => role,
        Err(e) => {
            let error = AccountError::RegistrationFailed(e.to_string());
            return views::register_page(Some(&error.to_string())).into_response();
        }
    };
    let cmd = RegisterCommand {
        password: form.password,
        profile: NewProfile {
            email: form.email,
            role,
            full_name: form.full_name,
            student_id: form.student_id,
            faculty_id: form.faculty_id,
            department: form.department,
        },
    };
    match state.register_handler().handle(cmd).await {
        Ok(signed_in) => {
            remember(&session, signed_in).await;
            Redirect::to("/profile").into_response()
        }
        Err(e) => views::register_page(Some(&e.to_string())).into_response(),
    }
}

/// GET /profile - own resources, newest first
pub async fn profile(State(state): State<AppState>, login: RequireLogin) -> Html<String> {
    let resources = state
        .list_own_resources_handler()
        .handle(ListOwnResourcesQuery {
            user_id: login.user.user_id.clone(),
        })
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(user_id = %login.user.user_id, error = %e, "Fetch own resources failed");
            Vec::new()
        });
    views::profile_page(&login.user, &resources)
}

/// GET /admin
pub async fn admin(RequireAdmin(user): RequireAdmin) -> Html<String> {
    views::admin_page(&user)
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, login: RequireLogin) -> Redirect {
    let access_token = login.access_token().await;
    state.sign_out_handler().handle(access_token.as_deref()).await;
    login.session.lock().await.clear();
    tracing::info!(user_id = %login.user.user_id, "Signed out");
    Redirect::to("/")
}

/// Stores the signed-in user and any issued tokens in the web session.
async fn remember(session: &SessionHandle, signed_in: SignedIn) {
    let mut web = session.lock().await;
    web.clear();
    SessionBridge::save_backend_session(&mut web, signed_in.session.as_ref(), Timestamp::now());
    tracing::info!(user_id = %signed_in.user.user_id, role = %signed_in.user.role, "Signed in");
    web.user = Some(signed_in.user);
}
