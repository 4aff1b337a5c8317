//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, DirectoryConfig, LogFormat, LoggingConfig, ProtectedRouteConfig,
    RoutesConfig, ServerConfig,
};
