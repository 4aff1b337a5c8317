//! Session token infrastructure

mod jwt;

pub use jwt::{JwtTokenService, SessionClaims, TokenConfig, TokenService};
