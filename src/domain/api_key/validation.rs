//! Key shape checks and display masking

use thiserror::Error;

/// Fixed prefix carried by every issued secret
pub const KEY_PREFIX: &str = "dandi-";

/// Minimum total length a candidate must exceed to pass the shape check
const MIN_CANDIDATE_LENGTH: usize = 10;

const MAX_KEY_NAME_LENGTH: usize = 100;

/// Errors that can occur during key name validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KeyNameError {
    #[error("Key name cannot be empty")]
    Empty,

    #[error("Key name exceeds maximum length of {0} characters")]
    TooLong(usize),
}

/// Validate a display name for a key
///
/// Names are non-unique; the only constraints are non-empty (after
/// trimming) and a length cap.
pub fn validate_key_name(name: &str) -> Result<(), KeyNameError> {
    if name.trim().is_empty() {
        return Err(KeyNameError::Empty);
    }

    if name.len() > MAX_KEY_NAME_LENGTH {
        return Err(KeyNameError::TooLong(MAX_KEY_NAME_LENGTH));
    }

    Ok(())
}

/// Shape check for a candidate secret: fixed prefix and more than ten
/// characters overall. Does not verify the key was ever issued.
pub fn is_plausible_key(candidate: &str) -> bool {
    candidate.starts_with(KEY_PREFIX) && candidate.len() > MIN_CANDIDATE_LENGTH
}

/// Masked rendering of a secret: the prefix stays in the clear, every
/// remaining character becomes an asterisk. No partial reveal.
pub fn mask_secret(secret: &str) -> String {
    let rest = secret.strip_prefix(KEY_PREFIX).unwrap_or(secret);
    format!("{}{}", KEY_PREFIX, "*".repeat(rest.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_key_names() {
        assert!(validate_key_name("production").is_ok());
        assert!(validate_key_name("My Key 1").is_ok());
        assert!(validate_key_name("a").is_ok());
    }

    #[test]
    fn test_empty_key_name() {
        assert_eq!(validate_key_name(""), Err(KeyNameError::Empty));
        assert_eq!(validate_key_name("   "), Err(KeyNameError::Empty));
    }

    #[test]
    fn test_too_long_key_name() {
        let long_name = "a".repeat(101);
        assert_eq!(
            validate_key_name(&long_name),
            Err(KeyNameError::TooLong(100))
        );

        let max_name = "a".repeat(100);
        assert!(validate_key_name(&max_name).is_ok());
    }

    #[test]
    fn test_plausible_key_accepted() {
        // 17 characters, correct prefix
        assert!(is_plausible_key("dandi-1234567890"));
    }

    #[test]
    fn test_plausible_key_too_short() {
        // 8 characters
        assert!(!is_plausible_key("dandi-12"));
    }

    #[test]
    fn test_plausible_key_wrong_prefix() {
        assert!(!is_plausible_key("foo-1234567890"));
    }

    #[test]
    fn test_plausible_key_boundary() {
        // exactly 10 characters is rejected, 11 passes
        assert!(!is_plausible_key("dandi-1234"));
        assert!(is_plausible_key("dandi-12345"));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("dandi-abc123"), "dandi-******");
    }

    #[test]
    fn test_mask_secret_empty_remainder() {
        assert_eq!(mask_secret("dandi-"), "dandi-");
    }

    #[test]
    fn test_mask_secret_without_prefix() {
        // values missing the prefix come back fully masked
        assert_eq!(mask_secret("abc"), "dandi-***");
    }
}
