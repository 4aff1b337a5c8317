//! API layer - HTTP surface of the portal

pub mod admin;
pub mod auth;
pub mod health;
pub mod middleware;
pub mod organizer;
pub mod player;
pub mod router;
pub mod state;
pub mod types;

pub use router::create_router_with_state;
pub use state::AppState;
