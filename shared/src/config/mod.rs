//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and storage backend selection
//! - `server` - HTTP server configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, StorageBackend};
pub use server::ServerConfig;

/// Parse `key` from the environment, falling back to `default` when unset or malformed
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Storage backend selection
    pub storage: StorageBackend,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Seconds between expired-code sweeps
    pub code_sweep_interval_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            storage: StorageBackend::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            code_sweep_interval_seconds: 300,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            storage: StorageBackend::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            code_sweep_interval_seconds: env_parse("CODE_SWEEP_INTERVAL_SECONDS", 300),
        }
    }

    /// Refuse configurations that must never reach production
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if self.jwt.secret.is_empty() {
            return Err("JWT_SECRET must not be empty".to_string());
        }
        if self.code_sweep_interval_seconds == 0 {
            return Err("CODE_SWEEP_INTERVAL_SECONDS must be positive".to_string());
        }
        Ok(())
    }
}
