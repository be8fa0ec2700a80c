//! Supabase Storage implementation of `ImageStorage`.
//!
//! Uploads go to `POST /storage/v1/object/{bucket}/{key}` with `x-upsert: true`,
//! authorised with the uploader's token when present so bucket policies apply.

use async_trait::async_trait;
use reqwest::Method;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ImageStorage;

use super::client::{check_status, transport_error};
use super::SupabaseClient;

/// `ImageStorage` backed by a Supabase Storage bucket.
#[derive(Debug, Clone)]
pub struct SupabaseImageStorage {
    client: SupabaseClient,
    bucket: String,
}

impl SupabaseImageStorage {
    pub fn new(client: SupabaseClient) -> Self {
        let bucket = client.config().image_bucket.clone();
        Self { client, bucket }
    }
}

#[async_trait]
impl ImageStorage for SupabaseImageStorage {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        access_token: Option<&str>,
    ) -> Result<String, DomainError> {
        let url = self
            .client
            .storage_url(&format!("object/{}/{}", self.bucket, key));
        let request = match access_token {
            Some(token) => self.client.request_as(Method::POST, url, token),
            None => self.client.request(Method::POST, url),
        };
        let response = request
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(transport_error)?;
        check_status(response).await.map_err(|e| {
            DomainError::new(ErrorCode::StorageError, e.message().to_string())
                .with_detail("key", key)
        })?;
        Ok(self.public_url(key))
    }

    fn public_url(&self, key: &str) -> String {
        self.client
            .storage_url(&format!("object/public/{}/{}", self.bucket, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::supabase::SupabaseConfig;

    #[test]
    fn public_url_points_at_public_object_path() {
        let config = SupabaseConfig::new("https://abc.supabase.co", "key").with_image_bucket("images");
        let storage = SupabaseImageStorage::new(SupabaseClient::new(config).unwrap());

        assert_eq!(
            storage.public_url("posts/x.png"),
            "https://abc.supabase.co/storage/v1/object/public/images/posts/x.png"
        );
    }
}
