//! `StatusRepository` over the in-memory tables.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ResourceId};
use crate::domain::resource::StatusUpdate;
use crate::ports::StatusRepository;

use super::MemoryBackend;

#[async_trait]
impl StatusRepository for MemoryBackend {
    async fn append(&self, status: &StatusUpdate) -> Result<(), DomainError> {
        self.tables.write().await.statuses.push(status.clone());
        Ok(())
    }

    async fn list_for_resource(&self, id: &ResourceId) -> Result<Vec<StatusUpdate>, DomainError> {
        let tables = self.tables.read().await;
        let mut updates: Vec<StatusUpdate> = tables
            .statuses
            .iter()
            .filter(|s| s.resource_id == *id)
            .cloned()
            .collect();
        updates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(updates)
    }

    async fn count_by_resources(
        &self,
        ids: &[ResourceId],
    ) -> Result<HashMap<ResourceId, u64>, DomainError> {
        let tables = self.tables.read().await;
        let mut counts = HashMap::new();
        for status in tables.statuses.iter().filter(|s| ids.contains(&s.resource_id)) {
            *counts.entry(status.resource_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn latest_by_resources(
        &self,
        ids: &[ResourceId],
    ) -> Result<HashMap<ResourceId, StatusUpdate>, DomainError> {
        let tables = self.tables.read().await;
        let mut latest: HashMap<ResourceId, StatusUpdate> = HashMap::new();
        for status in tables.statuses.iter().filter(|s| ids.contains(&s.resource_id)) {
            match latest.get(&status.resource_id) {
                Some(seen) if seen.created_at >= status.created_at => {}
                _ => {
                    latest.insert(status.resource_id, status.clone());
                }
            }
        }
        Ok(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};

    fn comment_at(resource: ResourceId, message: &str, secs: i64) -> StatusUpdate {
        let mut s = StatusUpdate::comment(resource, message, UserId::new("u").unwrap());
        s.created_at = Timestamp::from_unix_secs(secs).unwrap();
        s
    }

    #[tokio::test]
    async fn batched_lookups_cover_requested_ids_only() {
        let backend = MemoryBackend::new();
        let a = ResourceId::new();
        let b = ResourceId::new();
        let c = ResourceId::new();
        backend.append(&comment_at(a, "a1", 10)).await.unwrap();
        backend.append(&comment_at(a, "a2", 20)).await.unwrap();
        backend.append(&comment_at(b, "b1", 5)).await.unwrap();
        backend.append(&comment_at(c, "c1", 5)).await.unwrap();

        let counts = backend.count_by_resources(&[a, b]).await.unwrap();
        assert_eq!(counts.get(&a), Some(&2));
        assert_eq!(counts.get(&b), Some(&1));
        assert_eq!(counts.get(&c), None);

        let latest = backend.latest_by_resources(&[a, b]).await.unwrap();
        assert_eq!(latest[&a].status_message, "a2");
        assert_eq!(latest[&b].status_message, "b1");
        assert!(!latest.contains_key(&c));
    }

    #[tokio::test]
    async fn list_for_resource_is_newest_first() {
        let backend = MemoryBackend::new();
        let id = ResourceId::new();
        backend.append(&comment_at(id, "first", 1)).await.unwrap();
        backend.append(&comment_at(id, "second", 2)).await.unwrap();

        let messages: Vec<_> = backend
            .list_for_resource(&id)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.status_message)
            .collect();
        assert_eq!(messages, vec!["second", "first"]);
    }
}
