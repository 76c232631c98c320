//! Application configuration loaded from environment variables.

use std::env;

use insighto_infra::JwtConfig;
#[cfg(feature = "postgres")]
use insighto_infra::DatabaseConfig;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Public origin of the application, used to resolve sign-in redirects.
    pub base_url: String,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    pub session: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: env::var("APP_BASE_URL")
                .ok()
                .filter(|u| !u.is_empty())
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            #[cfg(feature = "postgres")]
            database: Self::database_from_env(),
            session: JwtConfig::from_env(),
        }
    }

    #[cfg(feature = "postgres")]
    fn database_from_env() -> Option<DatabaseConfig> {
        let url = env::var("DATABASE_URL").ok().filter(|u| !u.is_empty())?;

        Some(DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            sql_logging: is_development(),
        })
    }

    /// Whether session cookies should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Query logging is a development aid only.
#[cfg(feature = "postgres")]
fn is_development() -> bool {
    env::var("RUST_ENV")
        .map(|v| v == "development" || v == "dev")
        .unwrap_or(false)
}
