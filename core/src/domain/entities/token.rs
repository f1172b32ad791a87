//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;

/// Default token lifetime (24 hours)
pub const TOKEN_EXPIRY_HOURS: i64 = 24;

/// JWT issuer
pub const JWT_ISSUER: &str = "sepm-auth";

/// JWT audience
pub const JWT_AUDIENCE: &str = "sepm-api";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Phone number of the user
    pub phone: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims for `user`, valid from `now` for `lifetime`
    pub fn for_user(
        user: &User,
        now: DateTime<Utc>,
        lifetime: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        Self {
            sub: user.id.to_string(),
            phone: user.phone_number.clone(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// A signed bearer token handed to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Encoded JWT
    pub token: String,

    /// Expiry time of the token
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Seconds until the token expires, zero if already expired
    pub fn expires_in(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}
