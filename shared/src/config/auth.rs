//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::env_parse;

/// Secret shipped for local development only
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT issuance configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Process-wide secret used to sign session tokens
    pub secret: String,

    /// Token validity window in hours
    pub token_expiry_hours: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            token_expiry_hours: 24,
            issuer: String::from("sepm-auth"),
            audience: String::from("sepm-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            token_expiry_hours: env_parse("JWT_EXPIRY_HOURS", defaults.token_expiry_hours),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or(defaults.audience),
        }
    }

    /// Set token expiry in hours
    pub fn with_expiry_hours(mut self, hours: i64) -> Self {
        self.token_expiry_hours = hours;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}
