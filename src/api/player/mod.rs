//! Player area endpoints

pub mod teams;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::api::middleware::RequirePlayer;
use crate::api::state::AppState;

/// Create the player area router
pub fn create_player_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/teams", get(teams::list_public_teams))
        .route(
            "/teams/{team_id}",
            get(teams::get_team).put(teams::update_team),
        )
        .route("/teams/{team_id}/join", post(teams::request_to_join))
        .route(
            "/teams/{team_id}/requests/{user_id}/accept",
            post(teams::accept_request),
        )
        .route(
            "/teams/{team_id}/requests/{user_id}/reject",
            post(teams::reject_request),
        )
}

/// Dashboard response
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub id: String,
    pub name: String,
    pub role: String,
}

/// GET /player/dashboard
pub async fn dashboard(RequirePlayer(user): RequirePlayer) -> Json<DashboardResponse> {
    Json(DashboardResponse {
        id: user.id().as_str().to_string(),
        name: user.name().to_string(),
        role: user.role().to_string(),
    })
}
