//! HTTP client for the directory service
//!
//! Thin consumer of the upstream Team/User REST API. Transport failures
//! surface as retryable `Upstream` errors; upstream status codes map
//! onto the domain error taxonomy. Timeouts are the HTTP client's own
//! and are treated as opaque transport failures.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::domain::team::{Team, TeamDirectory, TeamId, TeamUpdate};
use crate::domain::user::{User, UserDirectory, UserId};
use crate::domain::DomainError;

/// Directory client backed by the upstream REST API
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    message: String,
}

#[derive(Debug, serde::Serialize)]
struct LoginBody<'a> {
    name: &'a str,
    password: &'a str,
}

#[derive(Debug, serde::Serialize)]
struct TeamUpdateBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public: Option<bool>,
}

impl HttpDirectory {
    /// Create a new client for the given base URL
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        let base_url = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map upstream status codes onto the domain taxonomy
    async fn into_domain_error(response: Response) -> DomainError {
        let status = response.status();
        let message = response
            .json::<UpstreamError>()
            .await
            .map(|e| e.message)
            .unwrap_or_else(|_| format!("directory responded with status {}", status));

        match status {
            StatusCode::NOT_FOUND => DomainError::not_found(message),
            StatusCode::CONFLICT => DomainError::conflict(message),
            StatusCode::FORBIDDEN => DomainError::forbidden(message),
            StatusCode::UNAUTHORIZED => DomainError::unauthorized(message),
            StatusCode::BAD_REQUEST => DomainError::validation(message),
            _ => DomainError::upstream(message),
        }
    }

    async fn read_team(response: Response) -> Result<Team, DomainError> {
        if !response.status().is_success() {
            return Err(Self::into_domain_error(response).await);
        }

        response
            .json::<Team>()
            .await
            .map_err(|e| DomainError::upstream(format!("Invalid team record: {}", e)))
    }

    fn transport(e: reqwest::Error) -> DomainError {
        DomainError::upstream(format!("Directory request failed: {}", e))
    }
}

#[async_trait]
impl UserDirectory for HttpDirectory {
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        debug!(user_id = %id, "Fetching user from directory");

        let response = self
            .client
            .get(self.url(&format!("/users/{}", id)))
            .send()
            .await
            .map_err(Self::transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Self::into_domain_error(response).await);
        }

        let user = response
            .json::<User>()
            .await
            .map_err(|e| DomainError::upstream(format!("Invalid user record: {}", e)))?;

        Ok(Some(user))
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let response = self
            .client
            .get(self.url("/users"))
            .send()
            .await
            .map_err(Self::transport)?;

        if !response.status().is_success() {
            return Err(Self::into_domain_error(response).await);
        }

        response
            .json::<Vec<User>>()
            .await
            .map_err(|e| DomainError::upstream(format!("Invalid user listing: {}", e)))
    }

    async fn authenticate(
        &self,
        name: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        debug!(name = %name, "Verifying credentials against directory");

        let response = self
            .client
            .post(self.url("/users/login"))
            .json(&LoginBody { name, password })
            .send()
            .await
            .map_err(Self::transport)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Self::into_domain_error(response).await);
        }

        let user = response
            .json::<User>()
            .await
            .map_err(|e| DomainError::upstream(format!("Invalid user record: {}", e)))?;

        Ok(Some(user))
    }
}

#[async_trait]
impl TeamDirectory for HttpDirectory {
    async fn get_team(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        debug!(team_id = %id, "Fetching team from directory");

        let response = self
            .client
            .get(self.url(&format!("/teams/{}", id)))
            .send()
            .await
            .map_err(Self::transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Self::into_domain_error(response).await);
        }

        let team = response
            .json::<Team>()
            .await
            .map_err(|e| DomainError::upstream(format!("Invalid team record: {}", e)))?;

        Ok(Some(team))
    }

    async fn list_public_teams(&self) -> Result<Vec<Team>, DomainError> {
        let response = self
            .client
            .get(self.url("/teams/public"))
            .send()
            .await
            .map_err(Self::transport)?;

        if !response.status().is_success() {
            return Err(Self::into_domain_error(response).await);
        }

        response
            .json::<Vec<Team>>()
            .await
            .map_err(|e| DomainError::upstream(format!("Invalid team listing: {}", e)))
    }

    async fn submit_join_request(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Team, DomainError> {
        debug!(team_id = %team_id, user_id = %user_id, "Submitting join request");

        let response = self
            .client
            .post(self.url(&format!("/teams/{}/requests", team_id)))
            .json(&serde_json::json!({ "user_id": user_id }))
            .send()
            .await
            .map_err(Self::transport)?;

        Self::read_team(response).await
    }

    async fn accept_request(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Team, DomainError> {
        debug!(team_id = %team_id, user_id = %user_id, "Accepting join request");

        let response = self
            .client
            .post(self.url(&format!("/teams/{}/requests/{}/accept", team_id, user_id)))
            .send()
            .await
            .map_err(Self::transport)?;

        Self::read_team(response).await
    }

    async fn reject_request(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Team, DomainError> {
        debug!(team_id = %team_id, user_id = %user_id, "Rejecting join request");

        let response = self
            .client
            .post(self.url(&format!("/teams/{}/requests/{}/reject", team_id, user_id)))
            .send()
            .await
            .map_err(Self::transport)?;

        Self::read_team(response).await
    }

    async fn update_team(
        &self,
        team_id: &TeamId,
        update: TeamUpdate,
    ) -> Result<Team, DomainError> {
        debug!(team_id = %team_id, "Updating team metadata");

        let body = TeamUpdateBody {
            name: update.name,
            image: update.image,
            public: update.public,
        };

        let response = self
            .client
            .put(self.url(&format!("/teams/{}", team_id)))
            .json(&body)
            .send()
            .await
            .map_err(Self::transport)?;

        Self::read_team(response).await
    }
}
