//! Authentication API endpoints
//!
//! Login verifies credentials against the directory, issues the signed
//! session token and sets it as an HttpOnly cookie. Logout clears the
//! cookie; the token itself is stateless.

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(get_current_user))
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
    /// Role area the client should navigate to
    pub landing: String,
    pub expires_at: String,
}

/// User response (safe to expose)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl UserResponse {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            role: user.role().to_string(),
        }
    }
}

/// Login with name and password
///
/// POST /auth/login
///
/// Returns the session token and sets it as an HttpOnly cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .users
        .authenticate(&request.name, &request.password)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::unauthorized("Invalid name or password"))?;

    let token = state
        .tokens
        .issue(&user)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let expires_at = Utc::now() + Duration::hours(state.tokens.expiration_hours() as i64);

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        state.auth.cookie_name,
        token,
        state.tokens.expiration_hours() * 3600
    );

    let body = LoginResponse {
        token,
        landing: user.role().landing_path().to_string(),
        user: UserResponse::from_user(&user),
        expires_at: expires_at.to_rfc3339(),
    };

    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(body)))
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Logout by clearing the session cookie
///
/// POST /auth/logout
///
/// Tokens are stateless; discarding the cookie ends the session.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        state.auth.cookie_name
    );

    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Get current authenticated user
///
/// GET /auth/me
///
/// The record comes fresh from the directory, not from the token.
pub async fn get_current_user(
    RequireUser(user): RequireUser,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(UserResponse::from_user(&user)))
}
