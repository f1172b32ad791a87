//! Main token service implementation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, IssuedToken};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Issues signed session tokens for authenticated users.
///
/// There is no revocation; expiry is the only way a token stops working.
#[derive(Clone)]
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Errors
    ///
    /// `TokenError::InvalidSecret` if the configured secret is empty
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.jwt_secret.trim().is_empty() {
            return Err(TokenError::InvalidSecret.into());
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Signs a token carrying the user's id and phone number
    pub fn issue(&self, user: &User) -> Result<IssuedToken, DomainError> {
        let now = Utc::now();
        let lifetime = Duration::hours(self.config.token_expiry_hours);
        let claims = Claims::for_user(
            user,
            now,
            lifetime,
            &self.config.issuer,
            &self.config.audience,
        );

        let token = self.encode_jwt(&claims)?;
        Ok(IssuedToken {
            token,
            expires_at: now + lifetime,
        })
    }

    /// Decodes and validates a token issued by this service
    pub fn decode(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))
    }

    /// Token lifetime in hours
    pub fn expiry_hours(&self) -> i64 {
        self.config.token_expiry_hours
    }

    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }
}
