//! Configuration for the token service

use jsonwebtoken::Algorithm;

use crate::domain::entities::token::{JWT_AUDIENCE, JWT_ISSUER, TOKEN_EXPIRY_HOURS};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Token lifetime in hours
    pub token_expiry_hours: i64,
    /// `iss` claim
    pub issuer: String,
    /// `aud` claim
    pub audience: String,
}

impl TokenServiceConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Self::default()
        }
    }

    pub fn with_expiry_hours(mut self, hours: i64) -> Self {
        self.token_expiry_hours = hours;
        self
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            token_expiry_hours: TOKEN_EXPIRY_HOURS,
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
        }
    }
}
