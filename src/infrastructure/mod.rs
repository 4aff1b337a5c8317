//! Infrastructure layer - Concrete implementations

pub mod auth;
pub mod directory;
pub mod logging;
pub mod membership;

pub use auth::{JwtTokenService, SessionClaims, TokenConfig, TokenService};
pub use directory::{HttpDirectory, InMemoryDirectory};
pub use membership::MembershipService;
