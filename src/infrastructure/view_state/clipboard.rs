//! Clipboard copy with transient per-row feedback

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;

use crate::domain::api_key::ApiKey;
use crate::domain::{DomainError, Severity};
use crate::infrastructure::notification::NotificationChannel;

/// How long the "just copied" marker stays set
pub const COPIED_MARKER_DURATION: Duration = Duration::from_millis(2000);

/// External clipboard capability
#[async_trait]
pub trait Clipboard: Send + Sync + std::fmt::Debug {
    /// Copy text to the clipboard
    async fn copy(&self, text: &str) -> Result<(), DomainError>;
}

/// In-memory clipboard, also used as the test double
#[derive(Debug, Default)]
pub struct InMemoryClipboard {
    contents: RwLock<Option<String>>,
    should_fail: RwLock<bool>,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last copied text
    pub async fn contents(&self) -> Option<String> {
        self.contents.read().await.clone()
    }

    /// Make subsequent copies fail
    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }
}

#[async_trait]
impl Clipboard for InMemoryClipboard {
    async fn copy(&self, text: &str) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::clipboard("Clipboard unavailable"));
        }

        let mut contents = self.contents.write().await;
        *contents = Some(text.to_string());
        Ok(())
    }
}

/// Copy-to-clipboard with a self-reverting "just copied" marker
///
/// On success the copied record's id is marked for two seconds and a
/// success notification is raised; on failure the marker is left unset
/// and an error notification is raised. The marker uses the same
/// generation guard as the notification channel so a newer copy
/// supersedes a pending revert.
#[derive(Debug)]
pub struct ClipboardFeedback {
    clipboard: Arc<dyn Clipboard>,
    notifier: Arc<NotificationChannel>,
    copied: Arc<RwLock<Option<String>>>,
    generation: Arc<AtomicU64>,
    marker_duration: Duration,
}

impl ClipboardFeedback {
    pub fn new(clipboard: Arc<dyn Clipboard>, notifier: Arc<NotificationChannel>) -> Self {
        Self {
            clipboard,
            notifier,
            copied: Arc::new(RwLock::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
            marker_duration: COPIED_MARKER_DURATION,
        }
    }

    /// Override the marker duration
    pub fn with_marker_duration(mut self, duration: Duration) -> Self {
        self.marker_duration = duration;
        self
    }

    /// Copy a record's full secret to the clipboard
    pub async fn copy(&self, key: &ApiKey) -> Result<(), DomainError> {
        match self.clipboard.copy(key.secret()).await {
            Ok(()) => {
                self.mark_copied(key.id().as_str()).await;
                self.notifier
                    .show("Copied API Key to clipboard", Severity::Success)
                    .await;
                Ok(())
            }
            Err(e) => {
                warn!(id = %key.id(), error = %e, "Clipboard copy failed");
                self.notifier
                    .show("Failed to copy to clipboard", Severity::Error)
                    .await;
                Err(e)
            }
        }
    }

    /// The record currently marked as just copied, if any
    pub async fn copied_id(&self) -> Option<String> {
        self.copied.read().await.clone()
    }

    async fn mark_copied(&self, id: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut copied = self.copied.write().await;
            *copied = Some(id.to_string());
        }

        let copied = self.copied.clone();
        let counter = self.generation.clone();
        let duration = self.marker_duration;

        tokio::spawn(async move {
            tokio::time::sleep(duration).await;

            if counter.load(Ordering::SeqCst) != generation {
                return;
            }

            let mut copied = copied.write().await;
            *copied = None;
        });
    }
}
