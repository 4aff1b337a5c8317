//! User entity and related types

use serde::{Deserialize, Serialize};

use super::validation::{validate_user_id, UserValidationError};

/// User identifier - alphanumeric + hyphens, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Portal role of a user
///
/// Role is authoritative only when it comes from the directory service.
/// It is never read out of a session token or client-side storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform administrator
    Admin,
    /// Tournament organizer
    Organizer,
    /// Regular player
    Player,
}

impl Role {
    /// Path prefix of the role's gated area
    pub fn area_prefix(&self) -> &'static str {
        match self {
            Self::Admin => "/admin",
            Self::Organizer => "/organizer",
            Self::Player => "/player",
        }
    }

    /// Route the user lands on after a successful login
    pub fn landing_path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::Organizer => "/organizer/dashboard",
            Self::Player => "/player/dashboard",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Organizer => write!(f, "organizer"),
            Self::Player => write!(f, "player"),
        }
    }
}

/// User record as served by the directory service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    id: UserId,
    /// Display name (also the login name)
    name: String,
    /// Contact email
    email: String,
    /// Portal role
    role: Role,
    /// Whether the profile is publicly visible
    #[serde(default)]
    public: bool,
}

impl User {
    /// Create a new user record
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            public: false,
        }
    }

    /// Mark the profile as publicly visible (builder pattern)
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    /// Check the user's role
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
