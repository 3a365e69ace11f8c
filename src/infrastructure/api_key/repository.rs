//! In-memory API key repository implementation

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository, NewApiKey};
use crate::domain::DomainError;

/// In-memory implementation of ApiKeyRepository
///
/// Records are kept ordered by creation time, newest first, matching
/// the ordered full-scan read of the external table.
#[derive(Debug)]
pub struct InMemoryApiKeyRepository {
    keys: Arc<RwLock<Vec<ApiKey>>>,
}

impl InMemoryApiKeyRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            keys: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a repository seeded with records (given newest first)
    pub fn with_keys(keys: Vec<ApiKey>) -> Self {
        Self {
            keys: Arc::new(RwLock::new(keys)),
        }
    }
}

impl Default for InMemoryApiKeyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn list(&self) -> Result<Vec<ApiKey>, DomainError> {
        let keys = self.keys.read().await;
        Ok(keys.clone())
    }

    async fn insert(&self, new_key: NewApiKey) -> Result<ApiKey, DomainError> {
        let mut keys = self.keys.write().await;

        if keys.iter().any(|k| k.secret() == new_key.secret) {
            return Err(DomainError::conflict(format!(
                "API key secret '{}' already exists",
                new_key.secret
            )));
        }

        let record = ApiKey::from_new(ApiKeyId::new(Uuid::new_v4().to_string()), new_key);
        keys.insert(0, record.clone());

        Ok(record)
    }

    async fn update_name(&self, id: &ApiKeyId, name: &str) -> Result<(), DomainError> {
        let mut keys = self.keys.write().await;

        let key = keys
            .iter_mut()
            .find(|k| k.id() == id)
            .ok_or_else(|| DomainError::not_found(format!("API key '{}' not found", id)))?;

        key.set_name(name);
        Ok(())
    }

    async fn remove(&self, id: &ApiKeyId) -> Result<(), DomainError> {
        let mut keys = self.keys.write().await;

        let position = keys
            .iter()
            .position(|k| k.id() == id)
            .ok_or_else(|| DomainError::not_found(format!("API key '{}' not found", id)))?;

        keys.remove(position);
        Ok(())
    }

    async fn find_by_secret(&self, secret: &str) -> Result<Option<ApiKey>, DomainError> {
        let keys = self.keys.read().await;
        Ok(keys.iter().find(|k| k.secret() == secret).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn insert_key(repo: &InMemoryApiKeyRepository, name: &str, secret: &str) -> ApiKey {
        repo.insert(NewApiKey::new(name, secret)).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let repo = InMemoryApiKeyRepository::new();

        let created = insert_key(&repo, "Test Key", "dandi-secret-1").await;

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id(), created.id());
    }

    #[tokio::test]
    async fn test_insert_assigns_unique_ids() {
        let repo = InMemoryApiKeyRepository::new();

        let first = insert_key(&repo, "First", "dandi-secret-1").await;
        let second = insert_key(&repo, "Second", "dandi-secret-2").await;

        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryApiKeyRepository::new();

        insert_key(&repo, "Older", "dandi-secret-1").await;
        insert_key(&repo, "Newer", "dandi-secret-2").await;

        let all = repo.list().await.unwrap();
        assert_eq!(all[0].name(), "Newer");
        assert_eq!(all[1].name(), "Older");
    }

    #[tokio::test]
    async fn test_insert_duplicate_secret() {
        let repo = InMemoryApiKeyRepository::new();

        insert_key(&repo, "First", "dandi-same").await;
        let result = repo.insert(NewApiKey::new("Second", "dandi-same")).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_name() {
        let repo = InMemoryApiKeyRepository::new();
        let created = insert_key(&repo, "Before", "dandi-secret-1").await;

        repo.update_name(created.id(), "After").await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all[0].name(), "After");
        assert_eq!(all[0].secret(), "dandi-secret-1");
    }

    #[tokio::test]
    async fn test_update_name_preserves_order() {
        let repo = InMemoryApiKeyRepository::new();
        let older = insert_key(&repo, "Older", "dandi-secret-1").await;
        insert_key(&repo, "Newer", "dandi-secret-2").await;

        repo.update_name(older.id(), "Renamed").await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all[0].name(), "Newer");
        assert_eq!(all[1].name(), "Renamed");
    }

    #[tokio::test]
    async fn test_update_name_missing() {
        let repo = InMemoryApiKeyRepository::new();

        let result = repo.update_name(&ApiKeyId::new("missing"), "Name").await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = InMemoryApiKeyRepository::new();
        let created = insert_key(&repo, "Test Key", "dandi-secret-1").await;

        repo.remove(created.id()).await.unwrap();

        let all = repo.list().await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_remove_missing_leaves_list_unchanged() {
        let repo = InMemoryApiKeyRepository::new();
        insert_key(&repo, "Kept", "dandi-secret-1").await;

        let result = repo.remove(&ApiKeyId::new("missing")).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_secret() {
        let repo = InMemoryApiKeyRepository::new();
        let created = insert_key(&repo, "Test Key", "dandi-findme-0001").await;

        let found = repo.find_by_secret("dandi-findme-0001").await.unwrap();
        assert_eq!(found.unwrap().id(), created.id());

        let missing = repo.find_by_secret("dandi-unknown-0002").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_with_keys_seed() {
        let seeded = vec![
            ApiKey::from_new(ApiKeyId::new("a"), NewApiKey::new("A", "dandi-a-000001")),
            ApiKey::from_new(ApiKeyId::new("b"), NewApiKey::new("B", "dandi-b-000001")),
        ];
        let repo = InMemoryApiKeyRepository::with_keys(seeded);

        assert_eq!(repo.list().await.unwrap().len(), 2);
    }
}
