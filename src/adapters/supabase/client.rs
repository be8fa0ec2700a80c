//! Shared REST client for a Supabase project.
//!
//! Wraps `reqwest` with the project's base URL and API key, and maps transport and
//! status failures onto [`DomainError`]. Table access goes through PostgREST
//! (`/rest/v1`), auth through GoTrue (`/auth/v1`) and files through Storage
//! (`/storage/v1`).
//!
//! # Example
//!
//! ```ignore
//! let client = SupabaseClient::from_config(&config.backend)?;
//! let rows: Vec<ResourceRow> = client
//!     .select("tweets", &[("order", "created_at.desc".into())])
//!     .await?;
//! ```

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::BackendConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Query string pairs passed to PostgREST (`column=op.value`, `order=...`).
pub type Query = [(&'static str, String)];

/// Connection details for a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL without trailing slash.
    pub url: String,
    api_key: SecretString,
    /// Bucket receiving uploaded images.
    pub image_bucket: String,
    pub timeout: Duration,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            api_key: SecretString::new(api_key.into()),
            image_bucket: "images".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Builds from validated backend configuration.
    pub fn from_backend(config: &BackendConfig) -> Result<Self, DomainError> {
        let api_key = config
            .api_key
            .as_ref()
            .map(|key| key.expose_secret().clone())
            .ok_or_else(|| DomainError::new(ErrorCode::InternalError, "Backend API key missing"))?;
        Ok(Self::new(config.url.clone(), api_key)
            .with_image_bucket(config.image_bucket.clone())
            .with_timeout(config.timeout()))
    }

    pub fn with_image_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.image_bucket = bucket.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// HTTP client bound to one Supabase project. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    config: SupabaseConfig,
    http: Client,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Result<Self, DomainError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(ErrorCode::InternalError, format!("HTTP client: {}", e))
            })?;
        Ok(Self { config, http })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, DomainError> {
        Self::new(SupabaseConfig::from_backend(config)?)
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url, path)
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    pub(crate) fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.config.url, path)
    }

    /// Request carrying the project key, authorised as the project.
    pub(crate) fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.request_as(method, url, self.config.api_key())
    }

    /// Request carrying the project key, authorised with `bearer`.
    pub(crate) fn request_as(&self, method: Method, url: String, bearer: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", self.config.api_key())
            .bearer_auth(bearer)
    }

    /// `GET /rest/v1/{table}` with filters.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, DomainError> {
        let response = self
            .request(Method::GET, self.rest_url(table))
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;
        parse_json(check_status(response).await?).await
    }

    /// `POST /rest/v1/{table}`, returning the inserted rows.
    pub async fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<Vec<R>, DomainError> {
        let response = self
            .request(Method::POST, self.rest_url(table))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(transport_error)?;
        parse_json(check_status(response).await?).await
    }

    /// `PATCH /rest/v1/{table}` with filters, returning the updated rows.
    pub async fn update<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
        patch: &T,
    ) -> Result<Vec<R>, DomainError> {
        let response = self
            .request(Method::PATCH, self.rest_url(table))
            .header("Prefer", "return=representation")
            .query(query)
            .json(patch)
            .send()
            .await
            .map_err(transport_error)?;
        parse_json(check_status(response).await?).await
    }

    /// `DELETE /rest/v1/{table}` with filters.
    pub async fn delete(&self, table: &str, query: &Query) -> Result<(), DomainError> {
        let response = self
            .request(Method::DELETE, self.rest_url(table))
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;
        check_status(response).await?;
        Ok(())
    }

    /// `POST /rest/v1/rpc/{function}` with `args` as the JSON body.
    pub(crate) fn rpc_request<T: Serialize>(&self, function: &str, args: &T) -> RequestBuilder {
        self.request(Method::POST, self.rest_url(&format!("rpc/{}", function)))
            .json(args)
    }

    /// Calls a database function; it runs in a single transaction.
    pub async fn rpc<T: Serialize, R: DeserializeOwned>(
        &self,
        function: &str,
        args: &T,
    ) -> Result<R, DomainError> {
        let response = self
            .rpc_request(function, args)
            .send()
            .await
            .map_err(transport_error)?;
        parse_json(check_status(response).await?).await
    }

    /// Like [`SupabaseClient::rpc`] for functions returning `void`.
    pub async fn rpc_void<T: Serialize>(&self, function: &str, args: &T) -> Result<(), DomainError> {
        let response = self
            .rpc_request(function, args)
            .send()
            .await
            .map_err(transport_error)?;
        check_status(response).await?;
        Ok(())
    }
}

/// `eq.` filter value.
pub fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

/// Maps a transport failure onto a backend error.
pub(crate) fn transport_error(e: reqwest::Error) -> DomainError {
    let message = if e.is_timeout() {
        "Backend request timed out".to_string()
    } else if e.is_connect() {
        format!("Backend connection failed: {}", e)
    } else {
        format!("Backend request failed: {}", e)
    };
    DomainError::backend(message)
}

/// Passes successful responses through; maps the rest onto domain errors.
pub(crate) async fn check_status(response: Response) -> Result<Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| body.clone());

    let code = match status {
        StatusCode::NOT_FOUND => ErrorCode::NotFound,
        StatusCode::UNAUTHORIZED => ErrorCode::Unauthorized,
        StatusCode::FORBIDDEN => ErrorCode::Forbidden,
        _ => ErrorCode::BackendError,
    };
    Err(DomainError::new(code, message).with_detail("status", status.as_u16().to_string()))
}

/// Extracts the human-readable message from a PostgREST/Storage error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

async fn parse_json<R: DeserializeOwned>(response: Response) -> Result<R, DomainError> {
    response
        .json()
        .await
        .map_err(|e| DomainError::backend(format!("Failed to parse backend response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_trims_trailing_slash() {
        let config = SupabaseConfig::new("https://abc.supabase.co/", "key");
        assert_eq!(config.url, "https://abc.supabase.co");
    }

    #[test]
    fn urls_are_built_per_service() {
        let client = SupabaseClient::new(SupabaseConfig::new("https://abc.supabase.co", "k")).unwrap();

        assert_eq!(client.rest_url("tweets"), "https://abc.supabase.co/rest/v1/tweets");
        assert_eq!(
            client.auth_url("token?grant_type=password"),
            "https://abc.supabase.co/auth/v1/token?grant_type=password"
        );
        assert_eq!(
            client.storage_url("object/images/a.png"),
            "https://abc.supabase.co/storage/v1/object/images/a.png"
        );
    }

    #[test]
    fn eq_filter_renders_postgrest_syntax() {
        assert_eq!(eq("abc"), "eq.abc");
    }

    #[test]
    fn error_message_prefers_message_field() {
        let body = r#"{"code":"23505","message":"duplicate key","details":null}"#;
        assert_eq!(error_message(body).as_deref(), Some("duplicate key"));
        assert_eq!(error_message("not json"), None);
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = SupabaseConfig::new("https://abc.supabase.co", "very-secret-key");
        assert!(!format!("{:?}", config).contains("very-secret-key"));
    }
}
