//! Short-lived session slot
//!
//! Carries a submitted candidate key from the playground submission to
//! the protected view. One string per token, expiring after a fixed
//! TTL. An explicit token handed to the caller stands in for the
//! ambient storage the flow would otherwise rely on.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use uuid::Uuid;

/// Default slot lifetime
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(600);

/// Opaque handle to a session slot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Rebuild a token from its wire form
    pub fn from_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// TTL-bounded store of session slots
#[derive(Debug)]
pub struct SessionStore {
    slots: MokaCache<String, String>,
}

impl SessionStore {
    /// Create a store with the default TTL
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }

    /// Create a store with a custom TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slots: MokaCache::builder()
                .max_capacity(10_000)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Write a value into a fresh slot and return its token
    pub async fn put(&self, value: impl Into<String>) -> SessionToken {
        let token = SessionToken::generate();
        self.slots.insert(token.as_str().to_string(), value.into()).await;
        token
    }

    /// Read the value for a token, if the slot is still live
    pub async fn get(&self, token: &SessionToken) -> Option<String> {
        self.slots.get(token.as_str()).await
    }

    /// Drop a slot
    pub async fn clear(&self, token: &SessionToken) {
        self.slots.invalidate(token.as_str()).await;
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
