//! API Key domain
//!
//! Domain types for issued API keys: the record entity, the repository
//! seam to the external table, and the shape/masking rules shared by
//! the dashboard and the playground gate.

mod entity;
mod repository;
mod validation;

pub use entity::{ApiKey, ApiKeyId, NewApiKey};
pub use repository::ApiKeyRepository;
pub use validation::{
    is_plausible_key, mask_secret, validate_key_name, KeyNameError, KEY_PREFIX,
};

#[cfg(test)]
pub use repository::mock;
