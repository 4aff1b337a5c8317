//! In-memory directory implementation
//!
//! Useful for development and tests. It provides the same consistency
//! guarantee the real directory service does: each mutation runs under a
//! single write lock, so a pending user is moved onto the roster in one
//! step and concurrent accept/reject calls against the same (team, user)
//! pair serialize cleanly.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::team::{Team, TeamDirectory, TeamId, TeamUpdate};
use crate::domain::user::{User, UserDirectory, UserId};
use crate::domain::DomainError;

/// Thread-safe in-memory user and team directory
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: RwLock<HashMap<String, User>>,
    passwords: RwLock<HashMap<String, String>>,
    teams: RwLock<HashMap<String, Team>>,
}

impl InMemoryDirectory {
    /// Creates a new empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user with a login password
    pub fn insert_user(&self, user: User, password: impl Into<String>) {
        self.passwords
            .write()
            .unwrap()
            .insert(user.name().to_string(), password.into());
        self.users
            .write()
            .unwrap()
            .insert(user.id().as_str().to_string(), user);
    }

    /// Register a team
    pub fn insert_team(&self, team: Team) {
        self.teams
            .write()
            .unwrap()
            .insert(team.id().as_str().to_string(), team);
    }

    fn read_teams(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Team>>, DomainError> {
        self.teams
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_teams(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Team>>, DomainError> {
        self.teams
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))
    }

    /// Run a mutation against one team under the write lock
    fn mutate_team<F>(&self, team_id: &TeamId, mutation: F) -> Result<Team, DomainError>
    where
        F: FnOnce(&mut Team) -> Result<(), DomainError>,
    {
        let mut teams = self.write_teams()?;

        let team = teams.get_mut(team_id.as_str()).ok_or_else(|| {
            DomainError::not_found(format!("Team '{}' not found", team_id))
        })?;

        mutation(team)?;
        Ok(team.clone())
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self
            .users
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(users.get(id.as_str()).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self
            .users
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(result)
    }

    async fn authenticate(
        &self,
        name: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let passwords = self
            .passwords
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        match passwords.get(name) {
            Some(stored) if stored == password => {}
            _ => return Ok(None),
        }
        drop(passwords);

        let users = self
            .users
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(users.values().find(|u| u.name() == name).cloned())
    }
}

#[async_trait]
impl TeamDirectory for InMemoryDirectory {
    async fn get_team(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        let teams = self.read_teams()?;
        Ok(teams.get(id.as_str()).cloned())
    }

    async fn list_public_teams(&self) -> Result<Vec<Team>, DomainError> {
        let teams = self.read_teams()?;

        let mut result: Vec<Team> = teams
            .values()
            .filter(|t| t.is_public())
            .cloned()
            .collect();
        result.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(result)
    }

    async fn submit_join_request(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Team, DomainError> {
        self.mutate_team(team_id, |team| team.submit_request(user_id.clone()))
    }

    async fn accept_request(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Team, DomainError> {
        self.mutate_team(team_id, |team| team.accept_request(user_id))
    }

    async fn reject_request(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Team, DomainError> {
        self.mutate_team(team_id, |team| team.reject_request(user_id))
    }

    async fn update_team(
        &self,
        team_id: &TeamId,
        update: TeamUpdate,
    ) -> Result<Team, DomainError> {
        self.mutate_team(team_id, |team| {
            if let Some(name) = update.name {
                team.set_name(name)
                    .map_err(|e| DomainError::validation(e.to_string()))?;
            }
            if let Some(image) = update.image {
                team.set_image(Some(image));
            }
            if let Some(public) = update.public {
                team.set_public(public);
            }
            Ok(())
        })
    }
}
