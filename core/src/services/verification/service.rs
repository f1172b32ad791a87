//! Main verification service implementation

use chrono::Duration;
use std::sync::Arc;

use sepm_shared::utils::mask_phone_number;

use crate::domain::entities::verification_code::{IssueOutcome, VerifyOutcome};
use crate::errors::DomainResult;
use crate::repositories::VerificationCodeRepository;

use super::traits::CodeNotifier;

/// Issues verification codes and hands them to the notifier
pub struct VerificationService<C, N>
where
    C: VerificationCodeRepository + 'static,
    N: CodeNotifier + 'static,
{
    /// Code storage
    codes: Arc<C>,
    /// SMS or other delivery channel
    notifier: Arc<N>,
}

impl<C, N> VerificationService<C, N>
where
    C: VerificationCodeRepository + 'static,
    N: CodeNotifier + 'static,
{
    /// Create a new verification service
    pub fn new(codes: Arc<C>, notifier: Arc<N>) -> Self {
        Self { codes, notifier }
    }

    /// Issue a code valid for `ttl` and dispatch it, unless one is still live.
    ///
    /// A new code is durably stored before this returns. Delivery runs on a
    /// detached task so a slow or failing notifier never delays the caller.
    /// A live code is returned as `IssueOutcome::Active` and not re-sent.
    pub async fn send_code(&self, phone: &str, ttl: Duration) -> DomainResult<IssueOutcome> {
        let outcome = self.codes.issue_unless_active(phone, ttl).await?;
        let IssueOutcome::Issued(record) = &outcome else {
            return Ok(outcome);
        };

        tracing::info!(
            phone = %mask_phone_number(phone),
            event = "otp_generated",
            session_id = %record.id,
            expires_at = %record.expires_at,
            "Generated new verification code for phone number"
        );

        let notifier = Arc::clone(&self.notifier);
        let phone = phone.to_string();
        let code = record.code.clone();
        tokio::spawn(async move {
            match notifier.deliver(&phone, &code).await {
                Ok(message_id) => tracing::info!(
                    phone = %mask_phone_number(&phone),
                    message_id = %message_id,
                    event = "otp_delivered",
                    "Verification code delivered"
                ),
                Err(e) => tracing::warn!(
                    phone = %mask_phone_number(&phone),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to deliver verification code"
                ),
            }
        });

        Ok(outcome)
    }

    /// Check a submitted code; a `Valid` outcome consumes it
    pub async fn verify(&self, phone: &str, code: &str) -> DomainResult<VerifyOutcome> {
        let outcome = self.codes.verify(phone, code).await?;

        tracing::info!(
            phone = %mask_phone_number(phone),
            event = "otp_verification",
            outcome = ?outcome,
            "Verification code checked"
        );

        Ok(outcome)
    }
}
