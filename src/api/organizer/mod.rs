//! Organizer area endpoints
//!
//! Tournament management itself lives elsewhere; this area only proves
//! out the role gate and echoes the organizer's own record.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::api::middleware::RequireOrganizer;
use crate::api::state::AppState;
use crate::domain::user::User;

/// Create the organizer area router
pub fn create_organizer_router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

/// Dashboard response
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub id: String,
    pub name: String,
    pub role: String,
}

/// GET /organizer/dashboard
pub async fn dashboard(RequireOrganizer(user): RequireOrganizer) -> Json<DashboardResponse> {
    Json(dashboard_response(&user))
}

fn dashboard_response(user: &User) -> DashboardResponse {
    DashboardResponse {
        id: user.id().as_str().to_string(),
        name: user.name().to_string(),
        role: user.role().to_string(),
    }
}
