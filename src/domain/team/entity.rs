//! Team entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_team_id, validate_team_name, TeamValidationError};
use crate::domain::user::{User, UserId};
use crate::domain::DomainError;

/// Team identifier - alphanumeric + hyphens, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamId(String);

impl TeamId {
    /// Create a new TeamId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, TeamValidationError> {
        let id = id.into();
        validate_team_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TeamId {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Captain reference as served by the directory
///
/// The directory returns the captain either as a bare user ID or as a
/// populated user record, depending on the endpoint. All comparisons go
/// through [`CaptainRef::user_id`] so the two shapes behave identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaptainRef {
    /// Bare user ID
    Id(UserId),
    /// Populated user record
    Populated(Box<User>),
}

impl CaptainRef {
    /// Canonical user ID of the captain
    pub fn user_id(&self) -> &UserId {
        match self {
            Self::Id(id) => id,
            Self::Populated(user) => user.id(),
        }
    }
}

impl From<UserId> for CaptainRef {
    fn from(id: UserId) -> Self {
        Self::Id(id)
    }
}

impl From<User> for CaptainRef {
    fn from(user: User) -> Self {
        Self::Populated(Box::new(user))
    }
}

/// Team record
///
/// Invariants: the captain is always part of the roster, and no user is
/// ever in the roster and the pending queue at the same time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    id: TeamId,
    /// Display name
    name: String,
    /// Crest/avatar image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    /// Whether the team shows up in public search
    #[serde(default)]
    public: bool,
    /// The single user allowed to manage the roster
    captain: CaptainRef,
    /// Accepted members, captain included
    players: Vec<UserId>,
    /// Unresolved join requests
    #[serde(default)]
    pending_requests: Vec<UserId>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team; the captain starts as the only roster member
    pub fn new(
        id: TeamId,
        name: impl Into<String>,
        captain: UserId,
    ) -> Result<Self, TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;

        Ok(Self {
            id,
            name,
            image: None,
            public: false,
            players: vec![captain.clone()],
            captain: CaptainRef::Id(captain),
            pending_requests: Vec::new(),
            created_at: Utc::now(),
        })
    }

    /// Mark the team as publicly searchable (builder pattern)
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Set the crest image (builder pattern)
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    // Getters

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn captain(&self) -> &CaptainRef {
        &self.captain
    }

    pub fn players(&self) -> &[UserId] {
        &self.players
    }

    pub fn pending_requests(&self) -> &[UserId] {
        &self.pending_requests
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // Queries

    /// Check whether the given user is the captain
    pub fn is_captain(&self, user_id: &UserId) -> bool {
        self.captain.user_id() == user_id
    }

    /// Check whether the given user is on the accepted roster
    ///
    /// The captain is always a member, even if the directory record
    /// omits them from the player list.
    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.is_captain(user_id) || self.players.contains(user_id)
    }

    /// Check whether the given user has an unresolved join request
    pub fn has_pending_request(&self, user_id: &UserId) -> bool {
        self.pending_requests.contains(user_id)
    }

    // Mutators

    /// Update the display name
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Update the crest image
    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image;
    }

    /// Update public visibility
    pub fn set_public(&mut self, public: bool) {
        self.public = public;
    }

    /// Queue a join request for the given user
    ///
    /// Rejects members, the captain, and duplicate requests with Conflict.
    pub fn submit_request(&mut self, user_id: UserId) -> Result<(), DomainError> {
        if self.is_member(&user_id) {
            return Err(DomainError::conflict(format!(
                "User '{}' is already a member of team '{}'",
                user_id, self.id
            )));
        }

        if self.has_pending_request(&user_id) {
            return Err(DomainError::conflict(format!(
                "User '{}' already has a pending request for team '{}'",
                user_id, self.id
            )));
        }

        self.pending_requests.push(user_id);
        Ok(())
    }

    /// Move a pending user onto the roster
    ///
    /// The removal and the insertion happen in one step, so no observer
    /// ever sees the user in both sets or in neither.
    pub fn accept_request(&mut self, user_id: &UserId) -> Result<(), DomainError> {
        let position = self
            .pending_requests
            .iter()
            .position(|id| id == user_id)
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "No pending request from user '{}' for team '{}'",
                    user_id, self.id
                ))
            })?;

        let accepted = self.pending_requests.remove(position);
        self.players.push(accepted);
        Ok(())
    }

    /// Drop a pending request without touching the roster
    pub fn reject_request(&mut self, user_id: &UserId) -> Result<(), DomainError> {
        let position = self
            .pending_requests
            .iter()
            .position(|id| id == user_id)
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "No pending request from user '{}' for team '{}'",
                    user_id, self.id
                ))
            })?;

        self.pending_requests.remove(position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;

    fn user_id(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn create_test_team(captain: &str) -> Team {
        Team::new(
            TeamId::new("los-tigres").unwrap(),
            "Los Tigres",
            user_id(captain),
        )
        .unwrap()
    }

    #[test]
    fn test_team_id_valid() {
        let id = TeamId::new("los-tigres").unwrap();
        assert_eq!(id.as_str(), "los-tigres");
    }

    #[test]
    fn test_team_id_invalid() {
        assert!(TeamId::new("").is_err());
        assert!(TeamId::new("-team").is_err());
        assert!(TeamId::new("team-").is_err());
        assert!(TeamId::new("team_name").is_err());
    }

    #[test]
    fn test_captain_ref_normalization() {
        let raw = CaptainRef::Id(user_id("u1"));
        assert_eq!(raw.user_id().as_str(), "u1");

        let populated = CaptainRef::Populated(Box::new(User::new(
            user_id("u1"),
            "Captain One",
            "u1@example.com",
            Role::Player,
        )));
        assert_eq!(populated.user_id().as_str(), "u1");

        assert_eq!(raw.user_id(), populated.user_id());
    }

    #[test]
    fn test_captain_ref_deserializes_both_shapes() {
        let raw: CaptainRef = serde_json::from_str("\"u1\"").unwrap();
        assert_eq!(raw.user_id().as_str(), "u1");

        let populated: CaptainRef = serde_json::from_str(
            r#"{"id": "u1", "name": "Captain", "email": "u1@example.com", "role": "player"}"#,
        )
        .unwrap();
        assert_eq!(populated.user_id().as_str(), "u1");
    }

    #[test]
    fn test_team_creation() {
        let team = create_test_team("u1");

        assert_eq!(team.name(), "Los Tigres");
        assert!(team.is_captain(&user_id("u1")));
        assert!(team.is_member(&user_id("u1")));
        assert!(team.pending_requests().is_empty());
        assert!(!team.is_public());
    }

    #[test]
    fn test_is_captain_for_both_captain_shapes() {
        let mut team = create_test_team("u1");
        assert!(team.is_captain(&user_id("u1")));
        assert!(!team.is_captain(&user_id("u2")));

        // Directory may hand back a populated captain record instead
        team.captain = CaptainRef::Populated(Box::new(User::new(
            user_id("u1"),
            "Captain",
            "u1@example.com",
            Role::Player,
        )));
        assert!(team.is_captain(&user_id("u1")));
        assert!(!team.is_captain(&user_id("u2")));
    }

    #[test]
    fn test_submit_request() {
        let mut team = create_test_team("u1");

        team.submit_request(user_id("u2")).unwrap();
        assert!(team.has_pending_request(&user_id("u2")));
        assert!(!team.is_member(&user_id("u2")));
    }

    #[test]
    fn test_submit_request_duplicate_is_conflict() {
        let mut team = create_test_team("u1");

        team.submit_request(user_id("u2")).unwrap();
        let result = team.submit_request(user_id("u2"));
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(team.pending_requests().len(), 1);
    }

    #[test]
    fn test_submit_request_member_is_conflict() {
        let mut team = create_test_team("u1");
        team.submit_request(user_id("u2")).unwrap();
        team.accept_request(&user_id("u2")).unwrap();

        let result = team.submit_request(user_id("u2"));
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[test]
    fn test_submit_request_captain_is_conflict() {
        let mut team = create_test_team("u1");

        let result = team.submit_request(user_id("u1"));
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[test]
    fn test_accept_request_moves_user_to_roster() {
        let mut team = create_test_team("u1");
        team.submit_request(user_id("u2")).unwrap();

        team.accept_request(&user_id("u2")).unwrap();

        assert!(team.is_member(&user_id("u2")));
        assert!(!team.has_pending_request(&user_id("u2")));
        assert_eq!(team.players(), &[user_id("u1"), user_id("u2")]);
    }

    #[test]
    fn test_accept_request_not_pending_is_not_found() {
        let mut team = create_test_team("u1");

        let result = team.accept_request(&user_id("u2"));
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert_eq!(team.players(), &[user_id("u1")]);
    }

    #[test]
    fn test_reject_request_leaves_roster_unchanged() {
        let mut team = create_test_team("u1");
        team.submit_request(user_id("u2")).unwrap();

        team.reject_request(&user_id("u2")).unwrap();

        assert!(!team.has_pending_request(&user_id("u2")));
        assert!(!team.is_member(&user_id("u2")));
        assert_eq!(team.players(), &[user_id("u1")]);
    }

    #[test]
    fn test_reject_request_not_pending_is_not_found() {
        let mut team = create_test_team("u1");

        let result = team.reject_request(&user_id("u2"));
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[test]
    fn test_roster_and_pending_stay_disjoint() {
        let mut team = create_test_team("u1");

        team.submit_request(user_id("u2")).unwrap();
        team.submit_request(user_id("u3")).unwrap();
        team.accept_request(&user_id("u2")).unwrap();

        for player in team.players() {
            assert!(!team.has_pending_request(player));
        }
        assert_eq!(team.pending_requests(), &[user_id("u3")]);
    }

    #[test]
    fn test_team_update_metadata() {
        let mut team = create_test_team("u1");

        team.set_name("Los Tigres FC").unwrap();
        team.set_image(Some("https://example.com/crest.png".to_string()));
        team.set_public(true);

        assert_eq!(team.name(), "Los Tigres FC");
        assert_eq!(team.image(), Some("https://example.com/crest.png"));
        assert!(team.is_public());
    }

    #[test]
    fn test_team_invalid_name() {
        let mut team = create_test_team("u1");
        assert!(team.set_name("").is_err());
    }

    #[test]
    fn test_team_deserializes_directory_record() {
        let json = r#"{
            "id": "los-tigres",
            "name": "Los Tigres",
            "public": true,
            "captain": "u1",
            "players": ["u1", "u2"],
            "pending_requests": ["u3"],
            "created_at": "2026-03-01T10:00:00Z"
        }"#;

        let team: Team = serde_json::from_str(json).unwrap();
        assert!(team.is_captain(&user_id("u1")));
        assert!(team.is_member(&user_id("u2")));
        assert!(team.has_pending_request(&user_id("u3")));
    }
}
