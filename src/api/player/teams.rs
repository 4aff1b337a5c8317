//! Player team endpoints
//!
//! The join/accept/reject flow rides on the membership service; the
//! team records returned to the client are always the directory's
//! authoritative state after the mutation.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequirePlayer;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::team::{Team, TeamId, TeamUpdate};
use crate::domain::user::UserId;

/// Team response for the player area
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub public: bool,
    pub captain: String,
    pub players: Vec<String>,
    pub pending_requests: Vec<String>,
    pub created_at: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().as_str().to_string(),
            name: team.name().to_string(),
            image: team.image().map(String::from),
            public: team.is_public(),
            captain: team.captain().user_id().as_str().to_string(),
            players: team.players().iter().map(|p| p.to_string()).collect(),
            pending_requests: team
                .pending_requests()
                .iter()
                .map(|p| p.to_string())
                .collect(),
            created_at: team.created_at().to_rfc3339(),
        }
    }
}

/// List teams response
#[derive(Debug, Clone, Serialize)]
pub struct ListTeamsResponse {
    pub teams: Vec<TeamResponse>,
    pub total: usize,
}

/// Request to update team metadata
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeamApiRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub public: Option<bool>,
}

fn parse_team_id(id: &str) -> Result<TeamId, ApiError> {
    TeamId::new(id).map_err(|e| ApiError::bad_request(e.to_string()))
}

fn parse_user_id(id: &str) -> Result<UserId, ApiError> {
    UserId::new(id).map_err(|e| ApiError::bad_request(e.to_string()))
}

/// GET /player/teams
///
/// Public team search listing.
pub async fn list_public_teams(
    State(state): State<AppState>,
    RequirePlayer(_): RequirePlayer,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    let teams = state
        .membership
        .public_teams()
        .await
        .map_err(ApiError::from)?;

    let responses: Vec<TeamResponse> = teams.iter().map(TeamResponse::from).collect();
    let total = responses.len();

    Ok(Json(ListTeamsResponse {
        teams: responses,
        total,
    }))
}

/// GET /player/teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    RequirePlayer(_): RequirePlayer,
    Path(team_id): Path<String>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team_id = parse_team_id(&team_id)?;

    let team = state
        .membership
        .team(&team_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(TeamResponse::from(&team)))
}

/// POST /player/teams/{team_id}/join
///
/// Submit a join request for the authenticated player.
pub async fn request_to_join(
    State(state): State<AppState>,
    RequirePlayer(user): RequirePlayer,
    Path(team_id): Path<String>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team_id = parse_team_id(&team_id)?;

    debug!(team_id = %team_id, user_id = %user.id(), "Player requesting to join team");

    let team = state
        .membership
        .request_to_join(&team_id, &user)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(TeamResponse::from(&team)))
}

/// POST /player/teams/{team_id}/requests/{user_id}/accept
///
/// Captain-only: move a pending request onto the roster.
pub async fn accept_request(
    State(state): State<AppState>,
    RequirePlayer(acting_user): RequirePlayer,
    Path((team_id, user_id)): Path<(String, String)>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team_id = parse_team_id(&team_id)?;
    let user_id = parse_user_id(&user_id)?;

    debug!(team_id = %team_id, user_id = %user_id, "Captain accepting join request");

    let team = state
        .membership
        .accept(&team_id, &user_id, &acting_user)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(TeamResponse::from(&team)))
}

/// POST /player/teams/{team_id}/requests/{user_id}/reject
///
/// Captain-only: drop a pending request.
pub async fn reject_request(
    State(state): State<AppState>,
    RequirePlayer(acting_user): RequirePlayer,
    Path((team_id, user_id)): Path<(String, String)>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team_id = parse_team_id(&team_id)?;
    let user_id = parse_user_id(&user_id)?;

    debug!(team_id = %team_id, user_id = %user_id, "Captain rejecting join request");

    let team = state
        .membership
        .reject(&team_id, &user_id, &acting_user)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(TeamResponse::from(&team)))
}

/// PUT /player/teams/{team_id}
///
/// Captain-only: edit team metadata.
pub async fn update_team(
    State(state): State<AppState>,
    RequirePlayer(acting_user): RequirePlayer,
    Path(team_id): Path<String>,
    Json(request): Json<UpdateTeamApiRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team_id = parse_team_id(&team_id)?;

    let update = TeamUpdate {
        name: request.name,
        image: request.image,
        public: request.public,
    };

    let team = state
        .membership
        .update_team(&team_id, &acting_user, update)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(TeamResponse::from(&team)))
}
