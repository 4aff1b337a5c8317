//! Team validation

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team ID cannot be empty")]
    EmptyId,

    #[error("Team ID cannot exceed {0} characters")]
    IdTooLong(usize),

    #[error("Team ID can only contain alphanumeric characters and hyphens")]
    InvalidIdCharacters,

    #[error("Team ID cannot start or end with a hyphen")]
    InvalidIdFormat,

    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),
}

const MAX_TEAM_ID_LENGTH: usize = 50;
const MAX_TEAM_NAME_LENGTH: usize = 100;

/// Validate a team ID
pub fn validate_team_id(id: &str) -> Result<(), TeamValidationError> {
    if id.is_empty() {
        return Err(TeamValidationError::EmptyId);
    }

    if id.len() > MAX_TEAM_ID_LENGTH {
        return Err(TeamValidationError::IdTooLong(MAX_TEAM_ID_LENGTH));
    }

    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(TeamValidationError::InvalidIdCharacters);
    }

    if id.starts_with('-') || id.ends_with('-') {
        return Err(TeamValidationError::InvalidIdFormat);
    }

    Ok(())
}

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.len() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}
