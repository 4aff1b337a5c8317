//! Team directory trait
//!
//! The directory service is the single source of truth for team records.
//! All mutations are delegated to it and the updated record it returns is
//! the only state this crate exposes afterwards - local state is never
//! advanced from an optimistic guess.

use async_trait::async_trait;

use super::entity::{Team, TeamId};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Metadata changes for a team; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub image: Option<String>,
    pub public: Option<bool>,
}

/// Access to the authoritative team records
///
/// Conflicting mutations against the same (team, user) pair are
/// serialized by the implementation; callers hold no locks.
#[async_trait]
pub trait TeamDirectory: Send + Sync + std::fmt::Debug {
    /// Get a team by ID
    async fn get_team(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    /// List publicly searchable teams
    async fn list_public_teams(&self) -> Result<Vec<Team>, DomainError>;

    /// Queue a join request, returning the updated team
    async fn submit_join_request(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Team, DomainError>;

    /// Accept a pending request, returning the updated team
    async fn accept_request(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Team, DomainError>;

    /// Reject a pending request, returning the updated team
    async fn reject_request(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Team, DomainError>;

    /// Apply metadata changes, returning the updated team
    async fn update_team(&self, team_id: &TeamId, update: TeamUpdate)
        -> Result<Team, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Directory that fails every call, for fail-closed tests
    #[derive(Debug, Default)]
    pub struct FailingTeamDirectory;

    #[async_trait]
    impl TeamDirectory for FailingTeamDirectory {
        async fn get_team(&self, _id: &TeamId) -> Result<Option<Team>, DomainError> {
            Err(DomainError::upstream("team directory unreachable"))
        }

        async fn list_public_teams(&self) -> Result<Vec<Team>, DomainError> {
            Err(DomainError::upstream("team directory unreachable"))
        }

        async fn submit_join_request(
            &self,
            _team_id: &TeamId,
            _user_id: &UserId,
        ) -> Result<Team, DomainError> {
            Err(DomainError::upstream("team directory unreachable"))
        }

        async fn accept_request(
            &self,
            _team_id: &TeamId,
            _user_id: &UserId,
        ) -> Result<Team, DomainError> {
            Err(DomainError::upstream("team directory unreachable"))
        }

        async fn reject_request(
            &self,
            _team_id: &TeamId,
            _user_id: &UserId,
        ) -> Result<Team, DomainError> {
            Err(DomainError::upstream("team directory unreachable"))
        }

        async fn update_team(
            &self,
            _team_id: &TeamId,
            _update: TeamUpdate,
        ) -> Result<Team, DomainError> {
            Err(DomainError::upstream("team directory unreachable"))
        }
    }
}
