//! Dandi Console
//!
//! Backend for an API-key dashboard and a key-gated playground:
//! - key lifecycle (issue, list, rename, revoke) over a repository seam
//! - single-slot self-expiring notification channel
//! - per-row reveal toggles and clipboard feedback
//! - two-stage validation gate with a short-lived session slot

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use config::ValidationPolicy;
use infrastructure::api_key::{InMemoryApiKeyRepository, KeyStore};
use infrastructure::gate::{HeuristicValidator, KeyValidator, StoreBackedValidator, ValidationGate};
use infrastructure::notification::NotificationChannel;
use infrastructure::session::SessionStore;
use infrastructure::view_state::{ClipboardFeedback, InMemoryClipboard, VisibilityState};

/// Create the application state with all components wired
pub fn create_app_state(config: &AppConfig) -> AppState {
    let repository = Arc::new(InMemoryApiKeyRepository::new());
    let notifier = Arc::new(NotificationChannel::new());

    let key_store = Arc::new(KeyStore::new(repository.clone(), notifier.clone()));

    let visibility = Arc::new(VisibilityState::new());
    let clipboard = Arc::new(ClipboardFeedback::new(
        Arc::new(InMemoryClipboard::new()),
        notifier.clone(),
    ));

    let sessions = Arc::new(SessionStore::with_ttl(Duration::from_secs(
        config.session.ttl_secs,
    )));

    let validator: Arc<dyn KeyValidator> = match config.gate.policy {
        ValidationPolicy::Heuristic => Arc::new(HeuristicValidator),
        ValidationPolicy::Lookup => Arc::new(StoreBackedValidator::new(repository)),
    };

    let gate = Arc::new(
        ValidationGate::new(validator, sessions, notifier.clone())
            .with_redirect_delay(Duration::from_millis(config.gate.redirect_delay_ms)),
    );

    AppState::new(key_store, notifier, visibility, clipboard, gate)
}
