//! API middleware components

pub mod role;
pub mod session_gate;

pub use role::{RequireAdmin, RequireOrganizer, RequirePlayer, RequireUser};
pub use session_gate::{extract_session_token, session_gate};
