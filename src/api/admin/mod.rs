//! Admin area endpoints

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;

/// Create the admin area router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/users", get(list_users))
}

/// User summary for the admin listing
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            role: user.role().to_string(),
        }
    }
}

/// List users response
#[derive(Debug, Clone, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserSummary>,
    pub total: usize,
}

/// Dashboard response
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub user: UserSummary,
}

/// GET /admin/dashboard
pub async fn dashboard(RequireAdmin(user): RequireAdmin) -> Json<DashboardResponse> {
    Json(DashboardResponse {
        user: UserSummary::from(&user),
    })
}

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<ListUsersResponse>, ApiError> {
    debug!("Admin listing all users");

    let users = state.users.list_users().await.map_err(ApiError::from)?;

    let summaries: Vec<UserSummary> = users.iter().map(UserSummary::from).collect();
    let total = summaries.len();

    Ok(Json(ListUsersResponse {
        users: summaries,
        total,
    }))
}
