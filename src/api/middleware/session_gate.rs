//! Session gate middleware
//!
//! Runs before every handler. Requests for protected paths must carry a
//! session token that verifies against the server-held secret; anything
//! else is redirected to the public entry route before route logic runs.
//! The gate deliberately leaks nothing about why access was denied - a
//! missing, malformed and expired token all look the same to the client.
//!
//! The gate checks token validity only. Role enforcement happens a second
//! time at the handlers, which re-fetch the user from the directory, so a
//! stale or absent role claim in the token can never widen access.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::api::state::AppState;

/// Gate every inbound request on the protected route table
pub async fn session_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();

    if state.routes.required_access(&path).is_none() {
        return next.run(req).await;
    }

    let Some(token) = extract_session_token(req.headers(), &state.auth.cookie_name) else {
        debug!(path = %path, "No session token on protected path, redirecting");
        return Redirect::to(&state.auth.login_redirect).into_response();
    };

    match state.tokens.verify(&token) {
        Ok(_) => next.run(req).await,
        Err(_) => {
            debug!(path = %path, "Session token rejected, redirecting");
            Redirect::to(&state.auth.login_redirect).into_response()
        }
    }
}

/// Extract the session token from the request
///
/// The session cookie is the primary transport; an `Authorization:
/// Bearer` header is accepted as a fallback for non-browser clients.
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    cookie_token(headers, cookie_name).or_else(|| bearer_token(headers))
}

fn cookie_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    raw.split(';')
        .map(str::trim)
        .find_map(|pair| {
            pair.strip_prefix(cookie_name)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    auth.strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}
