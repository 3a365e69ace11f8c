//! Application state for shared services

use std::sync::Arc;

use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository};
use crate::domain::DomainError;
use crate::infrastructure::api_key::KeyStore;
use crate::infrastructure::gate::ValidationGate;
use crate::infrastructure::notification::NotificationChannel;
use crate::infrastructure::view_state::{ClipboardFeedback, VisibilityState};

/// Application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub key_store: Arc<dyn KeyStoreHandle>,
    pub notifier: Arc<NotificationChannel>,
    pub visibility: Arc<VisibilityState>,
    pub clipboard: Arc<ClipboardFeedback>,
    pub gate: Arc<ValidationGate>,
}

/// Object-safe view of the key store, erasing the repository type
#[async_trait::async_trait]
pub trait KeyStoreHandle: Send + Sync {
    async fn keys(&self) -> Vec<ApiKey>;
    fn is_loading(&self) -> bool;
    async fn load(&self) -> Result<(), DomainError>;
    async fn create(&self, name: &str, monthly_limit: Option<u32>)
        -> Result<ApiKey, DomainError>;
    async fn rename(&self, id: &ApiKeyId, new_name: &str) -> Result<(), DomainError>;
    async fn delete(&self, id: &ApiKeyId) -> Result<(), DomainError>;
    async fn find(&self, id: &ApiKeyId) -> Option<ApiKey>;
}

#[async_trait::async_trait]
impl<R: ApiKeyRepository + 'static> KeyStoreHandle for KeyStore<R> {
    async fn keys(&self) -> Vec<ApiKey> {
        KeyStore::keys(self).await
    }

    fn is_loading(&self) -> bool {
        KeyStore::is_loading(self)
    }

    async fn load(&self) -> Result<(), DomainError> {
        KeyStore::load(self).await
    }

    async fn create(
        &self,
        name: &str,
        monthly_limit: Option<u32>,
    ) -> Result<ApiKey, DomainError> {
        KeyStore::create(self, name, monthly_limit).await
    }

    async fn rename(&self, id: &ApiKeyId, new_name: &str) -> Result<(), DomainError> {
        KeyStore::rename(self, id, new_name).await
    }

    async fn delete(&self, id: &ApiKeyId) -> Result<(), DomainError> {
        KeyStore::delete(self, id).await
    }

    async fn find(&self, id: &ApiKeyId) -> Option<ApiKey> {
        KeyStore::find(self, id).await
    }
}

impl AppState {
    /// Create new application state with provided components
    pub fn new(
        key_store: Arc<dyn KeyStoreHandle>,
        notifier: Arc<NotificationChannel>,
        visibility: Arc<VisibilityState>,
        clipboard: Arc<ClipboardFeedback>,
        gate: Arc<ValidationGate>,
    ) -> Self {
        Self {
            key_store,
            notifier,
            visibility,
            clipboard,
            gate,
        }
    }
}
