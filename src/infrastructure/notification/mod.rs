//! Single-slot notification channel
//!
//! The one feedback surface for every user-visible outcome. Holds at
//! most one notification; `show` replaces whatever is visible and
//! restarts the expiry timer, `dismiss` clears it early.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{Notification, Severity};

/// Default time a notification stays visible
pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

/// Self-expiring single-slot notification channel
///
/// Each `show` bumps a generation counter and spawns an expiry task
/// bound to that generation; a task whose generation no longer matches
/// finds itself superseded and leaves the slot alone. That keeps a
/// stale timer from clearing a newer notification.
#[derive(Debug)]
pub struct NotificationChannel {
    slot: Arc<RwLock<Option<Notification>>>,
    generation: Arc<AtomicU64>,
    duration: Duration,
}

impl NotificationChannel {
    /// Create a channel with the default 3 second expiry
    pub fn new() -> Self {
        Self::with_duration(DEFAULT_DURATION)
    }

    /// Create a channel with a custom expiry duration
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
            duration,
        }
    }

    /// Show a notification, replacing any visible one and restarting
    /// the expiry timer
    pub async fn show(&self, message: impl Into<String>, severity: Severity) {
        let notification = Notification::new(message, severity);
        debug!(message = %notification.message, ?severity, "Showing notification");

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut slot = self.slot.write().await;
            *slot = Some(notification);
        }

        let slot = self.slot.clone();
        let counter = self.generation.clone();
        let duration = self.duration;

        tokio::spawn(async move {
            tokio::time::sleep(duration).await;

            if counter.load(Ordering::SeqCst) != generation {
                return;
            }

            let mut slot = slot.write().await;
            *slot = None;
        });
    }

    /// Dismiss the visible notification, cancelling its pending expiry
    pub async fn dismiss(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);

        let mut slot = self.slot.write().await;
        *slot = None;
    }

    /// The currently visible notification, if any
    pub async fn current(&self) -> Option<Notification> {
        self.slot.read().await.clone()
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}
