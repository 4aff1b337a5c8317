use serde::Deserialize;

use crate::domain::session::{RouteAccess, RouteRule, RouteTable};
use crate::domain::user::Role;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub directory: DirectoryConfig,
    pub routes: RoutesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Session token settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Secret for signing session tokens; falls back to the JWT_SECRET
    /// environment variable, then to a generated throwaway secret
    pub jwt_secret: Option<String>,
    /// Token lifetime in hours
    pub jwt_expiration_hours: u32,
    /// Cookie the session token rides in
    pub cookie_name: String,
    /// Where unauthenticated requests for protected paths are sent
    pub login_redirect: String,
}

/// Directory service connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// "http" for the real directory service, "memory" for local development
    pub backend: String,
    /// Base URL of the directory service
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Protected route prefixes; configuration data, not logic
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    pub protected: Vec<ProtectedRouteConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProtectedRouteConfig {
    pub prefix: String,
    /// Role required inside the area; absent means any authenticated user
    #[serde(default)]
    pub role: Option<Role>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_expiration_hours: 24,
            cookie_name: "token".to_string(),
            login_redirect: "/".to_string(),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            base_url: "http://localhost:4000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            protected: [Role::Admin, Role::Organizer, Role::Player]
                .into_iter()
                .map(|role| ProtectedRouteConfig {
                    prefix: role.area_prefix().to_string(),
                    role: Some(role),
                })
                .collect(),
        }
    }
}

impl RoutesConfig {
    /// Build the route table the session gate evaluates per request
    pub fn route_table(&self) -> RouteTable {
        RouteTable::new(
            self.protected
                .iter()
                .map(|route| {
                    let access = match route.role {
                        Some(role) => RouteAccess::Role(role),
                        None => RouteAccess::AnyAuthenticated,
                    };
                    RouteRule::new(route.prefix.clone(), access)
                })
                .collect(),
        )
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
