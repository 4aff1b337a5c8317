//! Membership workflow service
//!
//! Mediates how a user joins a team and how the captain manages the
//! pending queue. The service enforces the guard logic; every mutation
//! is delegated to the directory and the state returned to callers is
//! always the directory's authoritative response.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::team::{Team, TeamDirectory, TeamId, TeamUpdate};
use crate::domain::user::{User, UserId};
use crate::domain::DomainError;

/// Team membership workflow
#[derive(Debug, Clone)]
pub struct MembershipService {
    teams: Arc<dyn TeamDirectory>,
}

impl MembershipService {
    /// Create a new membership service
    pub fn new(teams: Arc<dyn TeamDirectory>) -> Self {
        Self { teams }
    }

    /// Get a team by ID
    pub async fn team(&self, team_id: &TeamId) -> Result<Team, DomainError> {
        self.teams
            .get_team(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", team_id)))
    }

    /// List publicly searchable teams
    pub async fn public_teams(&self) -> Result<Vec<Team>, DomainError> {
        self.teams.list_public_teams().await
    }

    /// Check whether a user captains the given team
    ///
    /// If the team cannot be fetched the error propagates, so callers
    /// deny the action; the check never defaults to allow.
    pub async fn is_captain(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let team = self.team(team_id).await?;
        Ok(team.is_captain(user_id))
    }

    /// Submit a join request on behalf of the given user
    ///
    /// Duplicate requests are rejected with Conflict, as are requests
    /// from users already on the roster (captain included).
    pub async fn request_to_join(
        &self,
        team_id: &TeamId,
        user: &User,
    ) -> Result<Team, DomainError> {
        let team = self.team(team_id).await?;

        if team.is_member(user.id()) {
            return Err(DomainError::conflict(format!(
                "User '{}' is already a member of team '{}'",
                user.id(),
                team_id
            )));
        }

        if team.has_pending_request(user.id()) {
            return Err(DomainError::conflict(format!(
                "User '{}' already has a pending request for team '{}'",
                user.id(),
                team_id
            )));
        }

        info!(team_id = %team_id, user_id = %user.id(), "Submitting join request");
        self.teams.submit_join_request(team_id, user.id()).await
    }

    /// Accept a pending request; captain only
    pub async fn accept(
        &self,
        team_id: &TeamId,
        requesting_user: &UserId,
        acting_user: &User,
    ) -> Result<Team, DomainError> {
        let team = self.captain_team(team_id, acting_user).await?;

        if !team.has_pending_request(requesting_user) {
            return Err(DomainError::not_found(format!(
                "No pending request from user '{}' for team '{}'",
                requesting_user, team_id
            )));
        }

        info!(
            team_id = %team_id,
            user_id = %requesting_user,
            captain = %acting_user.id(),
            "Accepting join request"
        );
        self.teams.accept_request(team_id, requesting_user).await
    }

    /// Reject a pending request; captain only, roster untouched
    pub async fn reject(
        &self,
        team_id: &TeamId,
        requesting_user: &UserId,
        acting_user: &User,
    ) -> Result<Team, DomainError> {
        let team = self.captain_team(team_id, acting_user).await?;

        if !team.has_pending_request(requesting_user) {
            return Err(DomainError::not_found(format!(
                "No pending request from user '{}' for team '{}'",
                requesting_user, team_id
            )));
        }

        info!(
            team_id = %team_id,
            user_id = %requesting_user,
            captain = %acting_user.id(),
            "Rejecting join request"
        );
        self.teams.reject_request(team_id, requesting_user).await
    }

    /// Apply metadata changes to a team; captain only
    pub async fn update_team(
        &self,
        team_id: &TeamId,
        acting_user: &User,
        update: TeamUpdate,
    ) -> Result<Team, DomainError> {
        self.captain_team(team_id, acting_user).await?;

        info!(team_id = %team_id, captain = %acting_user.id(), "Updating team");
        self.teams.update_team(team_id, update).await
    }

    /// Fetch the team and require the acting user to be its captain
    async fn captain_team(
        &self,
        team_id: &TeamId,
        acting_user: &User,
    ) -> Result<Team, DomainError> {
        let team = self.team(team_id).await?;

        if !team.is_captain(acting_user.id()) {
            debug!(
                team_id = %team_id,
                user_id = %acting_user.id(),
                "Captain-only action denied"
            );
            return Err(DomainError::forbidden(format!(
                "Only the captain of team '{}' may manage it",
                team_id
            )));
        }

        Ok(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::mock::FailingTeamDirectory;
    use crate::domain::user::Role;
    use crate::infrastructure::directory::InMemoryDirectory;

    fn user(id: &str) -> User {
        User::new(
            UserId::new(id).unwrap(),
            id,
            format!("{}@example.com", id),
            Role::Player,
        )
    }

    fn user_id(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn team_id(id: &str) -> TeamId {
        TeamId::new(id).unwrap()
    }

    fn create_service() -> (MembershipService, Arc<InMemoryDirectory>) {
        let dir = Arc::new(InMemoryDirectory::new());

        dir.insert_team(
            Team::new(team_id("los-tigres"), "Los Tigres", user_id("u1"))
                .unwrap()
                .with_public(true),
        );

        let service = MembershipService::new(dir.clone());
        (service, dir)
    }

    #[tokio::test]
    async fn test_request_accept_flow() {
        // Team starts as {captain: u1, roster: [u1], pending: []}
        let (service, _) = create_service();
        let captain = user("u1");

        let team = service
            .request_to_join(&team_id("los-tigres"), &user("u2"))
            .await
            .unwrap();
        assert_eq!(team.pending_requests(), &[user_id("u2")]);

        let team = service
            .accept(&team_id("los-tigres"), &user_id("u2"), &captain)
            .await
            .unwrap();
        assert_eq!(team.players(), &[user_id("u1"), user_id("u2")]);
        assert!(team.pending_requests().is_empty());
    }

    #[tokio::test]
    async fn test_accept_by_non_captain_is_forbidden_and_leaves_team_unchanged() {
        let (service, dir) = create_service();

        service
            .request_to_join(&team_id("los-tigres"), &user("u4"))
            .await
            .unwrap();

        let result = service
            .accept(&team_id("los-tigres"), &user_id("u4"), &user("u3"))
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));

        let team = dir.get_team(&team_id("los-tigres")).await.unwrap().unwrap();
        assert_eq!(team.players(), &[user_id("u1")]);
        assert_eq!(team.pending_requests(), &[user_id("u4")]);
    }

    #[tokio::test]
    async fn test_reject_by_non_captain_is_forbidden() {
        let (service, _) = create_service();

        service
            .request_to_join(&team_id("los-tigres"), &user("u2"))
            .await
            .unwrap();

        let result = service
            .reject(&team_id("los-tigres"), &user_id("u2"), &user("u3"))
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_reject_removes_request_only() {
        let (service, _) = create_service();
        let captain = user("u1");

        service
            .request_to_join(&team_id("los-tigres"), &user("u2"))
            .await
            .unwrap();

        let team = service
            .reject(&team_id("los-tigres"), &user_id("u2"), &captain)
            .await
            .unwrap();

        assert!(team.pending_requests().is_empty());
        assert_eq!(team.players(), &[user_id("u1")]);
    }

    #[tokio::test]
    async fn test_duplicate_request_is_conflict() {
        let (service, _) = create_service();

        service
            .request_to_join(&team_id("los-tigres"), &user("u2"))
            .await
            .unwrap();

        let result = service
            .request_to_join(&team_id("los-tigres"), &user("u2"))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_request_from_member_is_conflict() {
        let (service, _) = create_service();
        let captain = user("u1");

        service
            .request_to_join(&team_id("los-tigres"), &user("u2"))
            .await
            .unwrap();
        service
            .accept(&team_id("los-tigres"), &user_id("u2"), &captain)
            .await
            .unwrap();

        let result = service
            .request_to_join(&team_id("los-tigres"), &user("u2"))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_request_from_captain_is_conflict() {
        let (service, _) = create_service();

        let result = service
            .request_to_join(&team_id("los-tigres"), &user("u1"))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_accept_without_pending_request_is_not_found() {
        let (service, _) = create_service();

        let result = service
            .accept(&team_id("los-tigres"), &user_id("u2"), &user("u1"))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_request_to_join_unknown_team_is_not_found() {
        let (service, _) = create_service();

        let result = service
            .request_to_join(&team_id("no-such-team"), &user("u2"))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_is_captain() {
        let (service, _) = create_service();

        assert!(service
            .is_captain(&team_id("los-tigres"), &user_id("u1"))
            .await
            .unwrap());
        assert!(!service
            .is_captain(&team_id("los-tigres"), &user_id("u2"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_captain_check_fails_closed_when_directory_is_down() {
        let service = MembershipService::new(Arc::new(FailingTeamDirectory));

        // The check errors rather than answering; callers deny the action
        let result = service
            .is_captain(&team_id("los-tigres"), &user_id("u1"))
            .await;
        assert!(result.is_err());

        let result = service
            .accept(&team_id("los-tigres"), &user_id("u2"), &user("u1"))
            .await;
        assert!(matches!(result, Err(DomainError::Upstream { .. })));
    }

    #[tokio::test]
    async fn test_update_team_captain_only() {
        let (service, _) = create_service();

        let update = TeamUpdate {
            name: Some("Los Tigres FC".to_string()),
            ..TeamUpdate::default()
        };

        let result = service
            .update_team(&team_id("los-tigres"), &user("u2"), update.clone())
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));

        let team = service
            .update_team(&team_id("los-tigres"), &user("u1"), update)
            .await
            .unwrap();
        assert_eq!(team.name(), "Los Tigres FC");
    }

    #[tokio::test]
    async fn test_full_lifecycle_scenario() {
        let (service, _) = create_service();
        let captain = user("u1");

        // u2 requests, captain accepts
        service
            .request_to_join(&team_id("los-tigres"), &user("u2"))
            .await
            .unwrap();
        let team = service
            .accept(&team_id("los-tigres"), &user_id("u2"), &captain)
            .await
            .unwrap();
        assert_eq!(team.players(), &[user_id("u1"), user_id("u2")]);
        assert!(team.pending_requests().is_empty());

        // u3 (not captain) cannot resolve a hypothetical request from u4
        let result = service
            .accept(&team_id("los-tigres"), &user_id("u4"), &user("u3"))
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));

        // At no point was u2 in roster and pending simultaneously
        let team = service.team(&team_id("los-tigres")).await.unwrap();
        for player in team.players() {
            assert!(!team.has_pending_request(player));
        }
    }
}
