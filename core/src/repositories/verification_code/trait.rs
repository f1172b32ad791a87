//! Verification code repository trait.

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::entities::verification_code::{IssueOutcome, VerificationCode, VerifyOutcome};
use crate::errors::DomainError;

/// Storage for verification codes, keyed by phone number.
///
/// At most one live (unused, unexpired) record may exist per phone number.
/// Implementations must make `issue`, `issue_unless_active` and `verify`
/// atomic per phone number.
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Generate a fresh code valid for `ttl`, replacing any previous record
    /// for the phone number in the same atomic step.
    async fn issue(&self, phone_number: &str, ttl: Duration) -> Result<VerificationCode, DomainError>;

    /// Like `issue`, but leaves a live record in place and returns it as
    /// `IssueOutcome::Active`. The liveness check and the write are one atomic
    /// step, so concurrent callers for the same phone get at most one `Issued`.
    async fn issue_unless_active(
        &self,
        phone_number: &str,
        ttl: Duration,
    ) -> Result<IssueOutcome, DomainError>;

    /// The live record for the phone number, without consuming it
    async fn peek_active(&self, phone_number: &str) -> Result<Option<VerificationCode>, DomainError>;

    /// Check `code` against the newest record for the phone number.
    ///
    /// Only a `Valid` outcome changes state: the record is marked used so the
    /// same code can never succeed twice.
    async fn verify(&self, phone_number: &str, code: &str) -> Result<VerifyOutcome, DomainError>;

    /// Delete every record that is expired or used; returns the number removed
    async fn purge_expired(&self) -> Result<u64, DomainError>;
}
