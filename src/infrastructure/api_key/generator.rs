//! API Key secret generation

use uuid::Uuid;

use crate::domain::api_key::KEY_PREFIX;

/// Generator for secret tokens
///
/// Every secret is the fixed prefix followed by a random UUID, so
/// uniqueness holds for the lifetime of the store.
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    prefix: String,
}

impl KeyGenerator {
    /// Create a generator with a custom prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Generate a new secret token
    pub fn generate(&self) -> String {
        format!("{}{}", self.prefix, Uuid::new_v4())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new(KEY_PREFIX)
    }
}
