//! Startup configuration for the API server

use anyhow::Context;

use sepm_core::services::token::TokenServiceConfig;
use sepm_shared::config::{AppConfig, JwtConfig};

/// Load `.env` (if present) and the process environment, then validate
pub fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid configuration")?;

    if config.jwt.is_using_default_secret() {
        log::warn!("JWT_SECRET is not set; using the development secret");
    }

    Ok(config)
}

/// Token service settings derived from the JWT configuration
pub fn token_config(jwt: &JwtConfig) -> TokenServiceConfig {
    TokenServiceConfig {
        jwt_secret: jwt.secret.clone(),
        token_expiry_hours: jwt.token_expiry_hours,
        issuer: jwt.issuer.clone(),
        audience: jwt.audience.clone(),
        ..TokenServiceConfig::default()
    }
}
