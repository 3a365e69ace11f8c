//! Per-row secret reveal toggles

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::api_key::{mask_secret, ApiKey};

/// Reveal state for dashboard rows, keyed by record id
///
/// Purely local view state: absent means hidden, and nothing here ever
/// touches persistence.
#[derive(Debug, Default)]
pub struct VisibilityState {
    revealed: RwLock<HashMap<String, bool>>,
}

impl VisibilityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the reveal toggle for a record; returns the new state
    pub async fn toggle(&self, id: &str) -> bool {
        let mut revealed = self.revealed.write().await;
        let entry = revealed.entry(id.to_string()).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Whether a record's secret is currently revealed
    pub async fn is_revealed(&self, id: &str) -> bool {
        let revealed = self.revealed.read().await;
        revealed.get(id).copied().unwrap_or(false)
    }

    /// Render a record's secret for display: full when revealed, the
    /// prefix plus one mask character per remaining character otherwise
    pub async fn display(&self, key: &ApiKey) -> String {
        if self.is_revealed(key.id().as_str()).await {
            key.secret().to_string()
        } else {
            mask_secret(key.secret())
        }
    }

    /// Drop the toggle for a record that no longer exists
    pub async fn forget(&self, id: &str) {
        let mut revealed = self.revealed.write().await;
        revealed.remove(id);
    }
}
