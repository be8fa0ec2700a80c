//! `ImageStorage` over the in-memory object map.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::ImageStorage;

use super::store::StoredObject;
use super::MemoryBackend;

#[async_trait]
impl ImageStorage for MemoryBackend {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        _access_token: Option<&str>,
    ) -> Result<String, DomainError> {
        self.tables.write().await.objects.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(self.public_url(key))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }
}
