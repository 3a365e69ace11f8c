//! API Key entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// API Key record identifier, assigned by the repository at insert time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeyId(String);

impl ApiKeyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ApiKeyId> for String {
    fn from(id: ApiKeyId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Insert payload for a new API key. The repository assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApiKey {
    /// Display name for the key
    pub name: String,
    /// Full secret token, generated before insert
    pub secret: String,
    /// Request counter, starts at zero
    pub usage: u64,
    /// Monthly usage cap collected at creation; stored, never enforced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_limit: Option<u32>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl NewApiKey {
    pub fn new(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret: secret.into(),
            usage: 0,
            monthly_limit: None,
            created_at: Utc::now(),
        }
    }

    /// Set the monthly usage cap
    pub fn with_monthly_limit(mut self, limit: u32) -> Self {
        self.monthly_limit = Some(limit);
        self
    }
}

/// API Key record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    /// Unique identifier, assigned exactly once and never reused
    id: ApiKeyId,
    /// Display name, mutable and non-unique
    name: String,
    /// Full secret token, immutable after creation
    secret: String,
    /// Request counter; tracked but not incremented anywhere yet
    usage: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    monthly_limit: Option<u32>,
    /// Creation timestamp, immutable
    created_at: DateTime<Utc>,
}

impl ApiKey {
    /// Materialize a record from an insert payload and a repository-assigned id
    pub fn from_new(id: ApiKeyId, new_key: NewApiKey) -> Self {
        Self {
            id,
            name: new_key.name,
            secret: new_key.secret,
            usage: new_key.usage,
            monthly_limit: new_key.monthly_limit,
            created_at: new_key.created_at,
        }
    }

    // Getters

    pub fn id(&self) -> &ApiKeyId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn usage(&self) -> u64 {
        self.usage
    }

    pub fn monthly_limit(&self) -> Option<u32> {
        self.monthly_limit
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Update the display name. The only mutable field on a record.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
