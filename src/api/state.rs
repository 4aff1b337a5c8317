//! Application state for shared services

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::domain::session::RouteTable;
use crate::domain::user::UserDirectory;
use crate::infrastructure::auth::TokenService;
use crate::infrastructure::membership::MembershipService;

/// Application state containing shared services using dynamic dispatch
#[derive(Debug, Clone)]
pub struct AppState {
    /// Authoritative user records
    pub users: Arc<dyn UserDirectory>,
    /// Membership workflow over the team directory
    pub membership: Arc<MembershipService>,
    /// Session token issuing and verification
    pub tokens: Arc<dyn TokenService>,
    /// Protected route prefixes the session gate evaluates
    pub routes: Arc<RouteTable>,
    /// Cookie and redirect settings
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        membership: Arc<MembershipService>,
        tokens: Arc<dyn TokenService>,
        routes: RouteTable,
        auth: AuthConfig,
    ) -> Self {
        Self {
            users,
            membership,
            tokens,
            routes: Arc::new(routes),
            auth: Arc::new(auth),
        }
    }
}
