//! User validation

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID cannot be empty")]
    EmptyId,

    #[error("User ID cannot exceed {0} characters")]
    IdTooLong(usize),

    #[error("User ID can only contain alphanumeric characters and hyphens")]
    InvalidIdCharacters,

    #[error("User ID cannot start or end with a hyphen")]
    InvalidIdFormat,

    #[error("Display name cannot be empty")]
    EmptyName,

    #[error("Display name cannot exceed {0} characters")]
    NameTooLong(usize),
}

const MAX_USER_ID_LENGTH: usize = 50;
const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Validate a user ID
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    if id.len() > MAX_USER_ID_LENGTH {
        return Err(UserValidationError::IdTooLong(MAX_USER_ID_LENGTH));
    }

    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(UserValidationError::InvalidIdCharacters);
    }

    if id.starts_with('-') || id.ends_with('-') {
        return Err(UserValidationError::InvalidIdFormat);
    }

    Ok(())
}

/// Validate a display name
pub fn validate_display_name(name: &str) -> Result<(), UserValidationError> {
    if name.is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    if name.len() > MAX_DISPLAY_NAME_LENGTH {
        return Err(UserValidationError::NameTooLong(MAX_DISPLAY_NAME_LENGTH));
    }

    Ok(())
}
