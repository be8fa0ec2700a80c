//! Image storage port for uploaded post pictures.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Object storage for images, addressed by key within the configured bucket.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Uploads (overwriting any object at `key`) and returns the public URL.
    ///
    /// `access_token` is the uploader's backend token, when they have one.
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        access_token: Option<&str>,
    ) -> Result<String, DomainError>;

    /// Public URL of the object at `key`.
    fn public_url(&self, key: &str) -> String;
}
