//! Domain layer - Core entities and business rules

pub mod api_key;
pub mod error;
pub mod notification;

pub use api_key::{
    is_plausible_key, mask_secret, validate_key_name, ApiKey, ApiKeyId, ApiKeyRepository,
    KeyNameError, NewApiKey, KEY_PREFIX,
};
pub use error::DomainError;
pub use notification::{Notification, Severity};
