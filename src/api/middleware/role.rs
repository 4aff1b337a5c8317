//! Authenticated-user and role extractors
//!
//! Second layer of the access check: the session gate already verified
//! the token, but these extractors re-verify it and fetch the user from
//! the directory so the role compared against is the authoritative one,
//! never a claim out of the token or client storage.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::api::middleware::session_gate::extract_session_token;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::{Role, User, UserId};

/// Extractor that requires a valid session and resolves the user
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_session_token(&parts.headers, &state.auth.cookie_name)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

        let claims = state
            .tokens
            .verify(&token)
            .map_err(|_| ApiError::unauthorized("Invalid session token"))?;

        let user_id = UserId::new(claims.user_id())
            .map_err(|_| ApiError::unauthorized("Invalid session token"))?;

        // A directory failure here denies the request; never fall back
        // to whatever the client claims to be
        let user = state
            .users
            .get_user(&user_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::unauthorized("User not found"))?;

        Ok(RequireUser(user))
    }
}

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    role: Role,
) -> Result<User, ApiError> {
    let RequireUser(user) = RequireUser::from_request_parts(parts, state).await?;

    if !user.has_role(role) {
        debug!(user_id = %user.id(), required = %role, actual = %user.role(), "Role check failed");
        return Err(ApiError::forbidden(format!("{} access required", role)));
    }

    Ok(user)
}

/// Extractor that requires an authenticated admin
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Admin).await.map(Self)
    }
}

/// Extractor that requires an authenticated organizer
#[derive(Debug, Clone)]
pub struct RequireOrganizer(pub User);

impl FromRequestParts<AppState> for RequireOrganizer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Organizer).await.map(Self)
    }
}

/// Extractor that requires an authenticated player
#[derive(Debug, Clone)]
pub struct RequirePlayer(pub User);

impl FromRequestParts<AppState> for RequirePlayer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Player).await.map(Self)
    }
}
