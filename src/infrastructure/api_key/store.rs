//! Key store
//!
//! Single source of truth for the dashboard's list of API key records.
//! All mutations round-trip through the repository before the owned
//! list changes, and every operation reports its outcome through the
//! notification channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::api_key::{
    validate_key_name, ApiKey, ApiKeyId, ApiKeyRepository, NewApiKey,
};
use crate::domain::{DomainError, Severity};
use crate::infrastructure::notification::NotificationChannel;

use super::generator::KeyGenerator;

/// Key store over a repository, owning the in-memory record list
///
/// Consumers get snapshots via [`KeyStore::keys`]; only the completion
/// paths of the store's own operations mutate the list. Mutations hold
/// the list write lock across the repository round-trip, so a second
/// mutation on the same record cannot overtake the first.
#[derive(Debug)]
pub struct KeyStore<R>
where
    R: ApiKeyRepository,
{
    repository: Arc<R>,
    generator: KeyGenerator,
    notifier: Arc<NotificationChannel>,
    keys: RwLock<Vec<ApiKey>>,
    loading: AtomicBool,
}

impl<R: ApiKeyRepository> KeyStore<R> {
    /// Create a new key store
    pub fn new(repository: Arc<R>, notifier: Arc<NotificationChannel>) -> Self {
        Self {
            repository,
            generator: KeyGenerator::default(),
            notifier,
            keys: RwLock::new(Vec::new()),
            loading: AtomicBool::new(false),
        }
    }

    /// Create with a custom generator
    pub fn with_generator(mut self, generator: KeyGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Snapshot of the record list, newest first
    pub async fn keys(&self) -> Vec<ApiKey> {
        self.keys.read().await.clone()
    }

    /// Whether a load is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Fetch all records from the repository, replacing the owned list
    ///
    /// On failure the list is left unchanged and the error is reported
    /// through the notification channel.
    pub async fn load(&self) -> Result<(), DomainError> {
        self.loading.store(true, Ordering::SeqCst);

        let result = self.repository.list().await;
        self.loading.store(false, Ordering::SeqCst);

        match result {
            Ok(records) => {
                info!(count = records.len(), "Loaded API keys");

                let mut keys = self.keys.write().await;
                *keys = records;
                drop(keys);

                self.notifier.show("API keys loaded", Severity::Info).await;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load API keys");
                self.notifier
                    .show("Failed to fetch API keys", Severity::Error)
                    .await;
                Err(e)
            }
        }
    }

    /// Create a new key and prepend the persisted record to the list
    ///
    /// Returns the created record so the caller can decide whether to
    /// close its dialog.
    pub async fn create(
        &self,
        name: &str,
        monthly_limit: Option<u32>,
    ) -> Result<ApiKey, DomainError> {
        if let Err(e) = validate_key_name(name) {
            self.notifier
                .show("Failed to create API Key", Severity::Error)
                .await;
            return Err(DomainError::validation(e.to_string()));
        }

        let mut new_key = NewApiKey::new(name, self.generator.generate());
        if let Some(limit) = monthly_limit {
            new_key = new_key.with_monthly_limit(limit);
        }

        let mut keys = self.keys.write().await;

        match self.repository.insert(new_key).await {
            Ok(record) => {
                info!(id = %record.id(), name = %record.name(), "API key created");

                keys.insert(0, record.clone());
                drop(keys);

                self.notifier
                    .show("API Key created successfully", Severity::Success)
                    .await;
                Ok(record)
            }
            Err(e) => {
                drop(keys);
                warn!(error = %e, "Failed to create API key");
                self.notifier
                    .show("Failed to create API Key", Severity::Error)
                    .await;
                Err(e)
            }
        }
    }

    /// Rename a key, updating only that record's name in place
    pub async fn rename(&self, id: &ApiKeyId, new_name: &str) -> Result<(), DomainError> {
        let mut keys = self.keys.write().await;

        match self.repository.update_name(id, new_name).await {
            Ok(()) => {
                info!(id = %id, "API key renamed");

                if let Some(key) = keys.iter_mut().find(|k| k.id() == id) {
                    key.set_name(new_name);
                }
                drop(keys);

                self.notifier
                    .show("API Key updated successfully", Severity::Success)
                    .await;
                Ok(())
            }
            Err(e) => {
                drop(keys);
                warn!(id = %id, error = %e, "Failed to rename API key");
                self.notifier
                    .show("Failed to update API Key", Severity::Error)
                    .await;
                Err(e)
            }
        }
    }

    /// Delete a key and drop it from the list
    pub async fn delete(&self, id: &ApiKeyId) -> Result<(), DomainError> {
        let mut keys = self.keys.write().await;

        match self.repository.remove(id).await {
            Ok(()) => {
                info!(id = %id, "API key deleted");

                keys.retain(|k| k.id() != id);
                drop(keys);

                self.notifier
                    .show("API Key deleted successfully", Severity::Success)
                    .await;
                Ok(())
            }
            Err(e) => {
                drop(keys);
                warn!(id = %id, error = %e, "Failed to delete API key");
                self.notifier
                    .show("Failed to delete API Key", Severity::Error)
                    .await;
                Err(e)
            }
        }
    }

    /// Find a record in the owned list by id
    pub async fn find(&self, id: &ApiKeyId) -> Option<ApiKey> {
        let keys = self.keys.read().await;
        keys.iter().find(|k| k.id() == id).cloned()
    }
}
