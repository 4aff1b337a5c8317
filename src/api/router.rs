use axum::{middleware, routing::get, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use super::state::AppState;
use super::{admin, auth, health, organizer, player};
use crate::api::middleware::session_gate;

/// Create the full router with application state
///
/// The session gate wraps every route; the route table decides which
/// paths it actually guards.
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Public entry route; also the gate's redirect target
        .route("/", get(entry))
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Authentication endpoints (no auth required for login)
        .nest("/auth", auth::create_auth_router())
        // Role areas
        .nest("/admin", admin::create_admin_router())
        .nest("/organizer", organizer::create_organizer_router())
        .nest("/player", player::create_player_router())
        // Session gate runs before any of the routes above
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_gate::session_gate,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Public entry route
async fn entry() -> Json<serde_json::Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
