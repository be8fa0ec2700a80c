//! Route configuration.
//!
//! Configures the Axum router with every page and JSON endpoint, wrapped in the
//! session middleware and request tracing.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::middleware::session_middleware;
use super::{pages, resources, AppState};

/// Largest accepted request body (image uploads included).
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Creates the application router.
///
/// Routes:
/// - `GET /` - ranked feed
/// - `GET /about` - static page
/// - `GET|POST /login`, `GET|POST /register`, `GET /logout`
/// - `GET /profile` - own resources (login)
/// - `GET /admin` - admin page (admin)
/// - `POST /upvote_resource` - JSON upvote toggle (login)
/// - `GET|POST /create_post` - share a resource (login)
/// - `POST /update_status/:id` - append a status update (login)
/// - `POST /delete_resource/:id` - JSON cascade delete (login)
/// - `GET|POST /edit_post/:id` - edit a resource (login)
/// - `GET|POST /comments/:id` - list and add comments (login)
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/about", get(pages::about))
        .route("/login", get(pages::login_form).post(pages::login))
        .route("/register", get(pages::register_form).post(pages::register))
        .route("/profile", get(pages::profile))
        .route("/admin", get(pages::admin))
        .route("/logout", get(pages::logout))
        .route("/upvote_resource", post(resources::upvote_resource))
        .route(
            "/create_post",
            get(resources::create_post_form).post(resources::create_post),
        )
        .route("/update_status/:id", post(resources::update_status))
        .route("/delete_resource/:id", post(resources::delete_resource))
        .route(
            "/edit_post/:id",
            get(resources::edit_post_form).post(resources::edit_post),
        )
        .route(
            "/comments/:id",
            get(resources::comments).post(resources::add_comment),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::{BackendPorts, SessionManager};
    use crate::adapters::memory::{MemoryAuthProvider, MemoryBackend, MemorySessionStore};
    use crate::application::DEFAULT_REFRESH_WINDOW;
    use crate::config::SessionConfig;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let ports = BackendPorts::in_memory(
            Arc::new(MemoryBackend::new()),
            Arc::new(MemoryAuthProvider::new()),
        );
        let sessions = SessionManager::new(
            Arc::new(MemorySessionStore::new()),
            &SessionConfig::new("0123456789abcdef0123456789abcdef"),
        )
        .unwrap();
        app_router(AppState::new(ports, sessions, DEFAULT_REFRESH_WINDOW))
    }

    async fn get(uri: &str) -> axum::response::Response {
        test_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn feed_renders_for_guests() {
        let response = get("/").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn about_renders_for_guests() {
        assert_eq!(get("/about").await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn gated_pages_redirect_guests_to_login() {
        for uri in ["/profile", "/create_post", "/logout"] {
            let response = get(uri).await;

            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
            assert_eq!(response.headers()[header::LOCATION], "/login", "{}", uri);
        }
    }

    #[tokio::test]
    async fn admin_page_sends_guests_home() {
        let response = get("/admin").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        assert_eq!(get("/nope").await.status(), StatusCode::NOT_FOUND);
    }
}
