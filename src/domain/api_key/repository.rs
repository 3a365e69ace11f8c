//! API Key repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{ApiKey, ApiKeyId, NewApiKey};
use crate::domain::DomainError;

/// Repository trait for the external API key table
///
/// The backing store is addressed by id and supports an ordered full
/// scan, insert-returning-row, update-by-id, and delete-by-id.
#[async_trait]
pub trait ApiKeyRepository: Send + Sync + Debug {
    /// List all records ordered by creation time, newest first
    async fn list(&self) -> Result<Vec<ApiKey>, DomainError>;

    /// Insert a new record; the repository assigns the id
    async fn insert(&self, new_key: NewApiKey) -> Result<ApiKey, DomainError>;

    /// Update the display name of an existing record
    async fn update_name(&self, id: &ApiKeyId, name: &str) -> Result<(), DomainError>;

    /// Remove a record
    async fn remove(&self, id: &ApiKeyId) -> Result<(), DomainError>;

    /// Look up a record by its full secret
    async fn find_by_secret(&self, secret: &str) -> Result<Option<ApiKey>, DomainError>;
}
