//! Subdomain label validation.
//!
//! Labels are checked in a fixed order: presence, length, then character set.
//! Input is normalized (trimmed and lowercased) before it reaches [`validate`],
//! which keeps the check itself case-sensitive.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Maximum length of a DNS label.
pub const MAX_LABEL_LENGTH: usize = 63;

/// Lowercase alphanumerics and hyphens, starting with an alphanumeric.
static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]?$").expect("label pattern is a valid regex")
});

/// Reason a candidate label was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a subdomain name")]
    Required,

    #[error("Domain name too long (max 63 characters)")]
    TooLong,

    #[error("Domain can only contain lowercase letters, numbers, and hyphens")]
    InvalidCharacters,
}

/// Normalizes raw user input into a candidate label.
pub fn normalize_candidate(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Validates a subdomain label.
///
/// # Rules
///
/// - Must not be empty
/// - At most [`MAX_LABEL_LENGTH`] characters
/// - Only `a-z`, `0-9` and `-`; cannot start with a hyphen
///
/// # Errors
///
/// Returns the first [`ValidationError`] whose rule is violated.
///
/// # Examples
///
/// ```
/// use subdomain_registrar::domain::validation::{validate, ValidationError};
///
/// assert!(validate("myblog").is_ok());
/// assert_eq!(validate(""), Err(ValidationError::Required));
/// assert_eq!(validate("My_Blog"), Err(ValidationError::InvalidCharacters));
/// ```
pub fn validate(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Required);
    }

    if name.chars().count() > MAX_LABEL_LENGTH {
        return Err(ValidationError::TooLong);
    }

    if !LABEL_PATTERN.is_match(name) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(())
}
