//! Configuration for the authentication service

use std::time::Duration;

use crate::domain::entities::verification_code::CODE_TTL_SECONDS;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Lifetime of an issued code; also the resend cooldown
    pub code_ttl_seconds: i64,
    /// Upper bound on any single storage call
    pub storage_timeout: Duration,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: CODE_TTL_SECONDS,
            storage_timeout: Duration::from_secs(5),
        }
    }
}

impl AuthServiceConfig {
    pub fn code_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.code_ttl_seconds)
    }
}
