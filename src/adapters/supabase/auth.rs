//! GoTrue adapter implementing the `AuthProvider` port.
//!
//! - Sign-in: `POST /auth/v1/token?grant_type=password`
//! - Refresh: `POST /auth/v1/token?grant_type=refresh_token`
//! - Sign-up: `POST /auth/v1/signup` (a bare user comes back when email
//!   confirmation is pending, a full session otherwise)
//! - Sign-out: `POST /auth/v1/logout` with the user's bearer token

use async_trait::async_trait;
use reqwest::{Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::domain::foundation::{AuthError, AuthOutcome, BackendSession, BackendUser, UserId};
use crate::ports::AuthProvider;

use super::SupabaseClient;

/// `AuthProvider` backed by Supabase GoTrue.
#[derive(Debug, Clone)]
pub struct SupabaseAuthProvider {
    client: SupabaseClient,
}

impl SupabaseAuthProvider {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<Response, AuthError> {
        let response = self
            .client
            .request(Method::POST, self.client.auth_url(path))
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;
        check_auth_status(response).await
    }
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoTrueSession {
    access_token: String,
    refresh_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
    user: GoTrueUser,
}

fn default_expires_in() -> i64 {
    3600
}

/// Sign-up answers with either a session or just the user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(GoTrueSession),
    User(GoTrueUser),
}

#[derive(Debug, Default, Deserialize)]
struct GoTrueError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl GoTrueError {
    fn message(&self) -> String {
        self.msg
            .clone()
            .or_else(|| self.error_description.clone())
            .or_else(|| self.message.clone())
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "Authentication failed".to_string())
    }

    fn code(&self) -> &str {
        self.error_code
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or_default()
    }
}

impl GoTrueUser {
    fn into_backend_user(self, fallback_email: &str) -> Result<BackendUser, AuthError> {
        let id = UserId::new(self.id)
            .map_err(|_| AuthError::service_unavailable("Auth response missing user id"))?;
        Ok(BackendUser {
            id,
            email: self.email.unwrap_or_else(|| fallback_email.to_string()),
        })
    }
}

impl GoTrueSession {
    fn into_outcome(self, fallback_email: &str) -> Result<AuthOutcome, AuthError> {
        let session = BackendSession::new(self.access_token, self.refresh_token, self.expires_in);
        Ok(AuthOutcome {
            user: self.user.into_backend_user(fallback_email)?,
            session: Some(session),
        })
    }
}

/// Maps GoTrue failures onto [`AuthError`].
async fn check_auth_status(response: Response) -> Result<Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let error: GoTrueError = serde_json::from_str(&body).unwrap_or_default();
    Err(map_auth_error(status, &error))
}

fn map_auth_error(status: StatusCode, error: &GoTrueError) -> AuthError {
    if status.is_server_error() {
        return AuthError::service_unavailable(format!("{}: {}", status, error.message()));
    }
    match error.code() {
        "invalid_credentials" => AuthError::InvalidCredentials,
        "invalid_grant" if error.message() == "Invalid login credentials" => {
            AuthError::InvalidCredentials
        }
        "refresh_token_not_found" | "refresh_token_already_used" | "bad_jwt" => {
            AuthError::InvalidToken
        }
        "session_expired" | "session_not_found" => AuthError::TokenExpired,
        "user_not_found" => AuthError::UserNotFound,
        _ if status == StatusCode::UNAUTHORIZED => AuthError::InvalidToken,
        _ => AuthError::rejected(error.message()),
    }
}

async fn parse<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, AuthError> {
    response
        .json()
        .await
        .map_err(|e| AuthError::service_unavailable(format!("Unexpected auth response: {}", e)))
}

#[async_trait]
impl AuthProvider for SupabaseAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let response = self
            .post(
                "token?grant_type=password",
                json!({ "email": email, "password": password }),
            )
            .await?;
        let session: GoTrueSession = parse(response).await?;
        tracing::debug!(email = %email, "Backend sign-in succeeded");
        session.into_outcome(email)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let response = self
            .post("signup", json!({ "email": email, "password": password }))
            .await?;
        match parse::<SignUpResponse>(response).await? {
            SignUpResponse::Session(session) => session.into_outcome(email),
            SignUpResponse::User(user) => {
                tracing::info!(email = %email, "Account created; email confirmation pending");
                Ok(AuthOutcome {
                    user: user.into_backend_user(email)?,
                    session: None,
                })
            }
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<BackendSession, AuthError> {
        let response = self
            .post(
                "token?grant_type=refresh_token",
                json!({ "refresh_token": refresh_token }),
            )
            .await?;
        let session: GoTrueSession = parse(response).await?;
        Ok(BackendSession::new(
            session.access_token,
            session.refresh_token,
            session.expires_in,
        ))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .request_as(Method::POST, self.client.auth_url("logout"), access_token)
            .send()
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;
        check_auth_status(response).await?;
        Ok(())
    }
}
