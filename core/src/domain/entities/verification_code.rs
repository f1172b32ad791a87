//! Verification code entity for SMS-based authentication.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Lifetime of a verification code; also the resend cooldown
pub const CODE_TTL_SECONDS: i64 = 60;

/// Outcome of checking a submitted code against the stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// Code matched a live record; the record is now consumed
    Valid,
    /// A live record exists but the code does not match; it stays live
    Incorrect,
    /// The newest record is past its expiry
    Expired,
    /// No record, or the newest record was already consumed
    NotFound,
}

impl VerifyOutcome {
    /// Whether the outcome grants access
    pub fn is_valid(&self) -> bool {
        matches!(self, VerifyOutcome::Valid)
    }
}

/// Result of asking the store for a new code while respecting the cooldown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    /// No live record existed; this one was stored and replaces any dead one
    Issued(VerificationCode),
    /// A live record already exists and was left untouched
    Active(VerificationCode),
}

/// Verification code record for one phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Phone number this code was issued for
    pub phone_number: String,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully used
    pub is_used: bool,
}

impl VerificationCode {
    /// Creates a new record with a random 6-digit code
    ///
    /// # Arguments
    ///
    /// * `phone_number` - The phone number the code is issued for
    /// * `now` - Issue time
    /// * `ttl` - How long the code stays usable
    pub fn new(phone_number: String, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self::with_code(phone_number, Self::generate_code(), now, ttl)
    }

    /// Creates a new record with a caller-supplied code
    pub fn with_code(phone_number: String, code: String, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone_number,
            code,
            created_at: now,
            expires_at: now + ttl,
            is_used: false,
        }
    }

    /// Generates a random 6-digit code using the OS CSPRNG.
    ///
    /// Leading zeros are kept, so every value in `000000..=999999` is possible.
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(0..1_000_000);
        format!("{:0width$}", code, width = CODE_LENGTH)
    }

    /// Checks if the code has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// A live code is neither used nor expired
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && !self.is_expired_at(now)
    }

    /// Decides the outcome of submitting `input` at `now`.
    ///
    /// This does not mutate the record; stores call [`mark_as_used`](Self::mark_as_used)
    /// inside the same critical section when the outcome is `Valid`.
    pub fn check(&self, input: &str, now: DateTime<Utc>) -> VerifyOutcome {
        if self.is_used {
            return VerifyOutcome::NotFound;
        }
        if self.is_expired_at(now) {
            return VerifyOutcome::Expired;
        }
        if constant_time_eq(self.code.as_bytes(), input.as_bytes()) {
            VerifyOutcome::Valid
        } else {
            VerifyOutcome::Incorrect
        }
    }

    /// Marks the verification code as used
    pub fn mark_as_used(&mut self) {
        self.is_used = true;
    }

    /// Whole seconds left until expiry, zero once expired
    pub fn seconds_remaining_at(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}
