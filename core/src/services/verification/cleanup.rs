//! Periodic purge of expired and consumed verification codes.
//!
//! Purely housekeeping: expiry is enforced on every read, so nothing depends
//! on when (or whether) the sweep runs.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::VerificationCodeRepository;

/// Configuration for the code cleanup service
#[derive(Debug, Clone)]
pub struct CodeCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for CodeCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300,
            enabled: true,
        }
    }
}

/// Service that periodically deletes dead verification codes
pub struct CodeCleanupService<C: VerificationCodeRepository + 'static> {
    codes: Arc<C>,
    config: CodeCleanupConfig,
}

impl<C: VerificationCodeRepository> CodeCleanupService<C> {
    pub fn new(codes: Arc<C>, config: CodeCleanupConfig) -> Self {
        Self { codes, config }
    }

    /// Run a single cleanup cycle; returns the number of records removed
    pub async fn run_once(&self) -> Result<u64, DomainError> {
        let removed = self.codes.purge_expired().await?;
        if removed > 0 {
            info!(removed, event = "codes_purged", "Purged expired verification codes");
        }
        Ok(removed)
    }

    /// Start the cleanup loop as a background task.
    ///
    /// Returns `None` when cleanup is disabled.
    pub fn start(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled || self.config.interval_seconds == 0 {
            warn!("Verification code cleanup is disabled");
            return None;
        }

        let interval = Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "Verification code cleanup started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut timer = tokio::time::interval(interval);
            loop {
                timer.tick().await;
                if let Err(e) = self.run_once().await {
                    error!("Verification code cleanup failed: {}", e);
                }
            }
        }))
    }
}
