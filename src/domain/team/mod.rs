//! Team domain module
//!
//! A team has exactly one captain, an accepted roster and a queue of
//! pending join requests. Only the captain resolves requests.

mod directory;
mod entity;
mod validation;

pub use directory::{TeamDirectory, TeamUpdate};
pub use entity::{CaptainRef, Team, TeamId};
pub use validation::{validate_team_id, validate_team_name, TeamValidationError};

#[cfg(test)]
pub use directory::mock;
