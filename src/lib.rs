//! Torneo Portal
//!
//! Server core of the tournament/team portal:
//! - Session gate over the three role areas (admin, organizer, player)
//! - Team membership workflow (join request, captain accept/reject)
//! - Clients for the authoritative Team/User directory service

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};

use api::state::AppState;
use domain::team::{Team, TeamDirectory, TeamId};
use domain::user::{Role, User, UserDirectory, UserId};
use infrastructure::auth::{JwtTokenService, TokenConfig, TokenService};
use infrastructure::directory::{HttpDirectory, InMemoryDirectory};
use infrastructure::membership::MembershipService;

/// Create the application state with default configuration
pub fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default())
}

/// Create the application state with custom configuration
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let (users, teams): (Arc<dyn UserDirectory>, Arc<dyn TeamDirectory>) =
        match config.directory.backend.as_str() {
            "memory" => {
                info!("Using in-memory directory (development mode)");
                let directory = Arc::new(InMemoryDirectory::new());
                seed_demo_directory(&directory)?;
                (directory.clone(), directory)
            }
            _ => {
                info!(
                    "Using directory service at {}",
                    config.directory.base_url
                );
                let directory = Arc::new(HttpDirectory::new(
                    &config.directory.base_url,
                    config.directory.timeout_secs,
                )?);
                (directory.clone(), directory)
            }
        };

    let membership = Arc::new(MembershipService::new(teams));
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(TokenConfig::new(
        resolve_jwt_secret(config),
        u64::from(config.auth.jwt_expiration_hours),
    )));

    Ok(AppState::new(
        users,
        membership,
        tokens,
        config.routes.route_table(),
        config.auth.clone(),
    ))
}

/// Resolve the token-signing secret from config, env var, or random
fn resolve_jwt_secret(config: &AppConfig) -> String {
    config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .unwrap_or_else(|| {
            warn!(
                "No JWT secret configured. Generating a random one; \
                sessions will NOT survive a restart. \
                Set JWT_SECRET or auth.jwt_secret for persistent sessions."
            );
            generate_random_secret()
        })
}

/// Generate a random token-signing secret
fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Generate a random password for the demo accounts
fn generate_random_password() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Seed the in-memory directory with demo accounts and a demo team
fn seed_demo_directory(directory: &InMemoryDirectory) -> anyhow::Result<()> {
    let password = match std::env::var("DEMO_PASSWORD") {
        Ok(p) if !p.is_empty() => p,
        _ => generate_random_password(),
    };

    for (id, role) in [
        ("root", Role::Admin),
        ("marta", Role::Organizer),
        ("capitana", Role::Player),
        ("ana", Role::Player),
    ] {
        let user = User::new(
            UserId::new(id)?,
            id,
            format!("{}@example.com", id),
            role,
        )
        .with_public(true);
        directory.insert_user(user, password.clone());
    }

    let team = Team::new(
        TeamId::new("los-tigres")?,
        "Los Tigres",
        UserId::new("capitana")?,
    )?
    .with_public(true);
    directory.insert_team(team);

    info!("===========================================");
    info!("Demo directory seeded!");
    info!("Accounts: root (admin), marta (organizer), capitana, ana (players)");
    info!("Password: {}", password);
    info!("===========================================");

    Ok(())
}
