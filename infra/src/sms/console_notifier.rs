//! Console notifier
//!
//! Logs verification codes instead of sending an SMS. Used in development
//! and whenever no SMS provider is configured.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use sepm_core::services::verification::CodeNotifier;
use sepm_shared::utils::mask_phone_number;

/// Notifier that writes codes to the log
#[derive(Clone)]
pub struct ConsoleNotifier {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::with_failure(false)
    }

    /// A notifier whose every delivery fails
    pub fn with_failure(simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
        }
    }

    /// Get the total number of codes delivered
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeNotifier for ConsoleNotifier {
    async fn deliver(&self, phone: &str, code: &str) -> Result<String, String> {
        let masked_phone = mask_phone_number(phone);

        if self.simulate_failure {
            warn!(
                "Console notifier simulating failure for phone: {}",
                masked_phone
            );
            return Err("Simulated SMS sending failure".to_string());
        }

        let message_id = format!("console_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "sms_service",
            provider = "console",
            phone = %masked_phone,
            message_id = %message_id,
            count,
            "Verification code for {}: {}",
            masked_phone,
            code
        );

        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_delivery_success() {
        let notifier = ConsoleNotifier::new();
        let result = notifier.deliver("13800138000", "123456").await;

        let message_id = result.unwrap();
        assert!(message_id.starts_with("console_"));
        assert_eq!(notifier.get_message_count(), 1);
    }

    #[tokio::test]
    async fn test_console_delivery_failure() {
        let notifier = ConsoleNotifier::with_failure(true);

        assert!(notifier.deliver("13800138000", "123456").await.is_err());
        assert_eq!(notifier.get_message_count(), 0);
    }

    #[tokio::test]
    async fn test_counter_shared_between_clones() {
        let notifier = ConsoleNotifier::new();
        let clone = notifier.clone();

        for _ in 0..3 {
            clone.deliver("13800138000", "123456").await.unwrap();
        }
        assert_eq!(notifier.get_message_count(), 3);
    }
}
